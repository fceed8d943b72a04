// ctlrender-cli/src/help.rs
//
// Static help sections. Section names are matched with the same
// prefix-abbreviation idea as the option table: "f" selects format, "c"
// selects ctl, "co" selects compression.

/// Ordered section table: name, minimum prefix length, text.
const SECTIONS: &[(&str, usize, &str)] = &[
    ("format", 1, FORMAT_HELP),
    ("compression", 2, COMPRESSION_HELP),
    ("ctl", 1, CTL_HELP),
    ("scale", 1, SCALE_HELP),
    ("param", 1, PARAM_HELP),
];

/// Returns the help text for a section, the general usage text when no
/// section was named, or a pointer back to plain -help for an unknown one.
pub fn section_text(section: Option<&str>) -> String {
    let Some(requested) = section else {
        return USAGE.to_string();
    };
    SECTIONS
        .iter()
        .find(|(name, min_len, _)| requested.len() >= *min_len && name.starts_with(requested))
        .map(|(_, _, text)| (*text).to_string())
        .unwrap_or_else(|| {
            format!(
                "The '{requested}' section of the help does not exist. Try running ctlrender \
                 with\nonly the -help option.\n"
            )
        })
}

const USAGE: &str = "\
ctlrender - transforms an image using one or more CTL scripts, potentially
            converting the file format in the process

usage:
    ctlrender [<options> ...] <source file...> <destination>

options:

    <source file...>      One or more source files, space separated.

    <destination>         With a single source file this may be either a
                          file name or an existing directory; the output
                          format follows the destination extension unless
                          -format says otherwise. With more than one source
                          file it must be an existing directory, and a file
                          type conversion needs the -format option.

    -input_scale <value>  Scaling value for the input file.
                          Details with '-help scale'.

    -output_scale <value> Scaling value for the output file.
                          Details with '-help scale'.

    -format <output_fmt>  Output file format. Details with '-help format'.

    -compression <type>   OpenEXR compression type; ignored when not
                          writing an exr file. Details with
                          '-help compression'.

    -ctl <filename>       A CTL file to apply to the input images. May be
                          given more than once; scripts are applied
                          in order.

    -param1 ...           Value of a CTL script parameter.
    -param2 ...           Details on these and the -global_param variants
    -param3 ...           with '-help param'.

    -force                Overwrite existing output files.
    -noalpha              Drop the alpha channel on output.

    -verbose              Increases the level of output verbosity.
    -quiet                Decreases the level of output verbosity.
";

const FORMAT_HELP: &str = "\
format conversion:

    ctlrender converts file formats either implicitly, by the extension of
    the destination file, or via the -format option. Valid values for the
    -format option are:

        dpx10   DPX file, 10 bits per sample (32 bit packed)
        dpx12   DPX file, 12 bits per sample
        dpx16   DPX file, 16 bits per sample
        dpx8    DPX file, 8 bits per sample
        dpx     DPX file with the same bit depth as the source image

        tiff8   TIFF file, 8 bits per sample
        tiff16  TIFF file, 16 bits per sample
        tiff32  TIFF file, 32 bits per sample
        tiff    TIFF file with the same bit depth as the source image
                (tif, tif8, tif16, and tif32 are also accepted)

        exr16   OpenEXR file, half (16 bit float) per sample
        exr32   OpenEXR file, float (32 bit float) per sample
        exr     OpenEXR file with the same bit depth as the source

        aces    ACES-compliant exr file

    When a single source file is given together with a destination file
    name, the destination extension is interpreted like a -format value and
    is never changed. When the destination is a directory and -format is
    given, each output extension becomes the format's extension with the
    bit depth removed.

    No automatic depth scaling is implied by a format change; see
    '-help scale'.
";

const COMPRESSION_HELP: &str = "\
exr compression:

    When saving an OpenEXR file a compression scheme may be chosen with the
    -compression option. Without the option, PIZ is used. Valid values are:

        NONE    Do not compress.
        PIZ     (lossless) Ideal for photographic images. Default.
        ZIPS    (lossless) ZIP, one scanline at a time.
        ZIP     (lossless) Ideal for texture maps.
        RLE     (lossless) Ideal for images with large flat areas.
        PXR24   (lossy) Ideal for a large value range when full 32-bit
                accuracy is not needed; HALF and UINT channels are
                preserved exactly.
        B44     (lossy) Suited to real-time playback systems.
        B44A    (lossy) Like B44, smaller for large uniform areas.

    An unrecognized scheme name turns compression off with a warning.
";

const CTL_HELP: &str = "\
ctl file interpretation:

    ctlrender treats all CTL files as if they take their input as 'R', 'G',
    'B', and 'A' (optional) channels, and produce output as 'R', 'G', 'B',
    and 'A' (if required) channels. For a single channel input file only
    the 'G' channel is used.
";

const SCALE_HELP: &str = "\
input and output value scaling:

    To deal with differences in input and output file bit depth, input and
    output values can be scaled. The default handling depends on the format
    of the file in question.

    integral input files (integer tiff, integer dpx):
        With -input_scale, sample values from the file are *divided by* the
        scale. Without it, input values are normalized to 0.0-1.0 by the
        file's bit depth, equivalent to
        -input_scale <bits_per_sample_in_input_file>. DPX counts as an
        integral format here; ACES does not.

    floating point input files (exr, floating point tiff or dpx):
        With -input_scale, sample values are *multiplied by* the scale.
        Without it, values are used as-is (a scale of 1.0).

    integral output files (integer tiff, integer dpx):
        With -output_scale, transformed values are *multiplied by* the
        scale. Without it, values in 0.0-1.0 are scaled to the output
        file's bit depth, equivalent to
        -output_scale <bits_per_sample_in_output_file>.

    floating point output files (exr, floating point tiff or dpx):
        With -output_scale, transformed values are *divided by* the scale.
        Without it, values are used as-is.

    In all cases the output values (after output scaling) are clipped to
    the maximum values representable by the output file format.
";

const PARAM_HELP: &str = "\
ctl parameters:

    CTL scripts may define parameters that are not set until runtime. These
    take one, two, or three floating point values:

        -param1 <name> <float1>
        -param2 <name> <float1> <float2>
        -param3 <name> <float1> <float2> <float3>

        -global_param1 <name> <float1>
        -global_param2 <name> <float1> <float2>
        -global_param3 <name> <float1> <float2> <float3>

    A -paramN option applies to the script named by the closest preceding
    -ctl option and must come after it; a -global_paramN option applies to
    every script in the job.
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_section_prints_general_usage() {
        assert!(section_text(None).contains("usage:"));
    }

    #[test]
    fn sections_match_by_prefix() {
        assert!(section_text(Some("f")).contains("format conversion"));
        assert!(section_text(Some("scale")).contains("value scaling"));
        // "c" is ctl; compression needs at least two characters.
        assert!(section_text(Some("c")).contains("ctl file interpretation"));
        assert!(section_text(Some("co")).contains("exr compression"));
        assert!(section_text(Some("p")).contains("ctl parameters"));
    }

    #[test]
    fn unknown_section_points_back_to_help() {
        let text = section_text(Some("nonsense"));
        assert!(text.contains("'nonsense' section"));
        assert!(text.contains("-help"));
    }
}
