use indoc::indoc;

// Help text template with placeholder
pub const HELP_TEMPLATE: &str = indoc! {r#"
    Examples:
      # Creating a catalog with 101 slots and two initial rows
      %BINARY_NAME% catalog.dat create --slots 101 --row "1=hammer | 12.50 | 40" --row "8=saw | 20.00 | 5"

      # Inserting a record explicitly
      %BINARY_NAME% catalog.dat insert 15 "drill | 45.00 | 3"

      # Inserting a record from stdin
      echo "wrench | 7.25 | 18" | %BINARY_NAME% catalog.dat insert 22

      # Reading a record
      %BINARY_NAME% catalog.dat read 15

      # Insert-or-update
      %BINARY_NAME% catalog.dat save 15 "drill | 39.90 | 3"

      # Deleting a record (tombstone)
      %BINARY_NAME% catalog.dat delete 15

      # Listing all records with their slots
      %BINARY_NAME% catalog.dat list

      # Displaying file properties and load factor
      %BINARY_NAME% catalog.dat info

      # Copying the catalog file
      %BINARY_NAME% catalog.dat copy backup.dat

    Set RUST_LOG=debug to trace probe and slot activity on stderr.
"#};
