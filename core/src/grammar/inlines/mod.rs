// Inline-level grammar modules
//
// These recognizers run on plain `&str`: inline bodies are sliced
// substrings of the document, so absolute positions are advisory and the
// located-span machinery of the block grammar buys nothing here.

pub mod autolink;
pub mod backslash_escape;
pub mod delimiter_run;
pub mod inline_html;
pub mod link_suffix;

pub use autolink::{autolink, Autolink};
pub use backslash_escape::backslash_escape;
pub use delimiter_run::{classify_delimiter_run, DelimiterRun};
pub use inline_html::inline_html;
pub use link_suffix::{inline_suffix, reference_suffix};
