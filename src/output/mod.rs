mod styling;
mod summary;

pub use styling::{dim, magenta_bold};
pub use summary::{print_failure, print_summary};

/// Prints the launcher banner to stderr.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        magenta_bold("🚀 launcher"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("Screwdriver build launcher")
    );
}
