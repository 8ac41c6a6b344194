use clap::ValueEnum;
use vjs_bundle::OutputFormat;

/// Output module format
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Format {
    /// Universal module definition, loadable from a script tag
    #[value(name = "umd")]
    Umd,

    /// ECMAScript module
    #[value(name = "es", alias = "esm")]
    Es,

    /// CommonJS module
    #[value(name = "cjs")]
    Cjs,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Umd => OutputFormat::Umd,
            Format::Es => OutputFormat::Es,
            Format::Cjs => OutputFormat::Cjs,
        }
    }
}
