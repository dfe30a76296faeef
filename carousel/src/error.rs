/// Construction-time failures. A running engine has no fallible operations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CarouselError {
    #[error("a carousel needs at least one item")]
    EmptyItems,

    #[error("invalid option `{name}`: {value}")]
    InvalidOption { name: &'static str, value: f64 },
}
