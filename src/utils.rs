mod format_bytes;
pub use format_bytes::format_bytes;

mod primes;
pub use primes::{is_prime, next_prime};

mod verify_file_existence;
pub use verify_file_existence::verify_file_existence;
