//! OpenEXR compression scheme selection.
//!
//! The `-compression` option picks one of a fixed set of named schemes. An
//! unrecognized name is deliberately not an error: the choice degrades to no
//! compression and the lookup result carries the rejected name so the caller
//! can warn. The value is ignored by the engine for non-exr outputs.

use std::fmt;

/// Scheme names longer than this are truncated before lookup.
const MAX_SCHEME_LEN: usize = 8;

/// An OpenEXR compression scheme. `Piz` is the default (lossless, suited to
/// photographic images).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    None,
    #[default]
    Piz,
    Zips,
    Zip,
    Rle,
    Pxr24,
    B44,
    B44a,
}

impl Compression {
    /// Canonical (uppercase) scheme name as passed to the engine.
    pub fn name(self) -> &'static str {
        match self {
            Compression::None => "NONE",
            Compression::Piz => "PIZ",
            Compression::Zips => "ZIPS",
            Compression::Zip => "ZIP",
            Compression::Rle => "RLE",
            Compression::Pxr24 => "PXR24",
            Compression::B44 => "B44",
            Compression::B44a => "B44A",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a compression-name lookup.
///
/// `downgraded` distinguishes "requested and honored" from "requested and
/// downgraded": it holds the normalized name that was rejected, and is
/// `None` when the scheme was recognized (including an explicit `NONE`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionLookup {
    pub scheme: Compression,
    pub downgraded: Option<String>,
}

/// Looks up a compression scheme by name.
///
/// The name is uppercased and truncated to [`MAX_SCHEME_LEN`] characters
/// before matching, so `piz` and `Piz` select `PIZ`.
pub fn compression_named(name: &str) -> CompressionLookup {
    let mut scheme: String = name.chars().take(MAX_SCHEME_LEN).collect();
    scheme.make_ascii_uppercase();

    let found = match scheme.as_str() {
        "NONE" => Some(Compression::None),
        "PIZ" => Some(Compression::Piz),
        "ZIPS" => Some(Compression::Zips),
        "ZIP" => Some(Compression::Zip),
        "RLE" => Some(Compression::Rle),
        "PXR24" => Some(Compression::Pxr24),
        "B44" => Some(Compression::B44),
        "B44A" => Some(Compression::B44a),
        _ => None,
    };

    match found {
        Some(recognized) => CompressionLookup {
            scheme: recognized,
            downgraded: None,
        },
        None => CompressionLookup {
            scheme: Compression::None,
            downgraded: Some(scheme),
        },
    }
}
