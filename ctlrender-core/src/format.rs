//! Output format registry.
//!
//! A fixed table maps format tokens (`"dpx10"`, `"exr16"`, ...) to a
//! container kind and bit depth. Lookup is case-sensitive exact match and
//! the table is immutable; there is no insertion API.
//!
//! `aces` is a distinguished container: it writes an exr container to disk
//! and therefore shares exr's extension for matching and rewriting, but it
//! stays semantically distinct so the engine can apply ACES conventions.

use std::fmt;

use crate::error::{CoreError, CoreResult};

/// An output format: container kind plus bit depth.
///
/// A depth of 0 means "native": the output keeps the bit depth of the
/// source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub container: &'static str,
    pub depth: u32,
    /// Drop the alpha channel on output. Copied from the job's `-noalpha`
    /// flag at resolution time.
    pub squish: bool,
}

impl FormatSpec {
    const fn new(container: &'static str, depth: u32) -> Self {
        FormatSpec {
            container,
            depth,
            squish: false,
        }
    }

    /// The file extension written to disk for this format. `aces` files use
    /// the exr container on disk.
    pub fn output_extension(&self) -> &'static str {
        if self.container == "aces" {
            "exr"
        } else {
            self.container
        }
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "aces" is always 16-bit; the bare name is its registry token.
        if self.container == "aces" || self.depth == 0 {
            write!(f, "{}", self.container)
        } else {
            write!(f, "{}{}", self.container, self.depth)
        }
    }
}

/// Where a format token came from; tailors the lookup diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatContext {
    /// The token was given with an explicit `-format` option.
    ExplicitOption,
    /// The token was inferred from a destination file extension.
    FromExtension,
}

impl fmt::Display for FormatContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatContext::ExplicitOption => {
                write!(f, " for parameter '-format'; see '-help format' for more details")
            }
            FormatContext::FromExtension => {
                write!(f, " (determined from destination file extension)")
            }
        }
    }
}

const ALLOWED_FORMATS: &[(&str, FormatSpec)] = &[
    ("exr", FormatSpec::new("exr", 0)),
    ("exr16", FormatSpec::new("exr", 16)),
    ("exr32", FormatSpec::new("exr", 32)),
    ("aces", FormatSpec::new("aces", 16)),
    ("dpx", FormatSpec::new("dpx", 0)),
    ("dpx8", FormatSpec::new("dpx", 8)),
    ("dpx10", FormatSpec::new("dpx", 10)),
    ("dpx12", FormatSpec::new("dpx", 12)),
    ("dpx16", FormatSpec::new("dpx", 16)),
    ("tif", FormatSpec::new("tif", 0)),
    ("tiff", FormatSpec::new("tiff", 0)),
    ("tiff32", FormatSpec::new("tiff", 32)),
    ("tiff16", FormatSpec::new("tiff", 16)),
    ("tiff8", FormatSpec::new("tiff", 8)),
    ("tif32", FormatSpec::new("tif", 32)),
    ("tif16", FormatSpec::new("tif", 16)),
    ("tif8", FormatSpec::new("tif", 8)),
];

/// Looks up a format token in the registry.
pub fn find_format(token: &str, context: FormatContext) -> CoreResult<FormatSpec> {
    ALLOWED_FORMATS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, spec)| *spec)
        .ok_or_else(|| CoreError::UnknownFormat {
            token: token.to_string(),
            context,
        })
}
