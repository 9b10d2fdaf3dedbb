/// Converts a file size in bytes into a human-readable format.
///
/// # Conversion Logic:
/// - **1,024 bytes → KB**
/// - **1,024 KB → MB**
/// - **1,024 MB → GB**
///
/// Sizes of 1 KB and above use two decimal places; smaller sizes are shown
/// as raw bytes.
///
/// # Examples
/// ```
/// use hashslot::utils::format_bytes;
///
/// assert_eq!(format_bytes(264), "264 bytes");
/// assert_eq!(format_bytes(8 + 101 * 256), "25.26 KB");
/// assert_eq!(format_bytes(5_242_880), "5.00 MB");
/// assert_eq!(format_bytes(8_796_093_440), "8.19 GB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    match bytes {
        b if b >= GB => format!("{:.2} GB", b as f64 / GB as f64),
        b if b >= MB => format!("{:.2} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.2} KB", b as f64 / KB as f64),
        _ => format!("{} bytes", bytes),
    }
}
