/// Field introducing the digitizer declaration
pub const DIGITIZER: &str = "DIGITIZER";
/// Field holding the row count of a view
pub const LINES: &str = "LINES";
/// Field holding the column count of a view
pub const PIXELS_PER_LINE: &str = "PIXELS_PER_LINE";
/// Field holding the bit depth of a view
pub const BITS_PER_PIXEL: &str = "BITS_PER_PIXEL";
/// Field holding the scan resolution of a view, in microns
pub const RESOLUTION: &str = "RESOLUTION";
/// Flag marking a view that has an overlay file
pub const OVERLAY: &str = "OVERLAY";

/// One typed line of a sidecar file
///
/// Sidecar lines are whitespace-separated `FIELD value` sequences:
///
/// ```text
/// DIGITIZER LUMISYS LASER
/// LEFT_CC LINES 4696 PIXELS_PER_LINE 3024 BITS_PER_PIXEL 12 RESOLUTION 50 OVERLAY
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidecarLine {
    /// `DIGITIZER <name> ...`, name already lowercased
    Digitizer { name: String },

    /// A view declaration carrying at least `LINES` and `PIXELS_PER_LINE`
    ViewGeometry {
        /// Tokens preceding the geometry fields (normally just the view token)
        labels: Vec<String>,
        rows: u32,
        cols: u32,
        bits_per_pixel: Option<u32>,
        resolution: Option<u32>,
        has_overlay: bool,
    },

    /// Anything else
    Other,
}

impl SidecarLine {
    /// Parses one line
    ///
    /// # Example
    ///
    /// ```
    /// use mammoconv_core::sidecar::SidecarLine;
    ///
    /// let line = SidecarLine::parse("DIGITIZER HOWTEK");
    /// assert_eq!(line, SidecarLine::Digitizer { name: "howtek".to_string() });
    /// ```
    pub fn parse(line: &str) -> Self {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens.as_slice() {
            [] => SidecarLine::Other,
            [first, name, ..] if *first == DIGITIZER => SidecarLine::Digitizer {
                name: name.to_lowercase(),
            },
            [first] if *first == DIGITIZER => SidecarLine::Other,
            _ => parse_view_geometry(&tokens).unwrap_or(SidecarLine::Other),
        }
    }

    /// Whether this is a geometry line declared for `view_token`
    pub fn declares_view(&self, view_token: &str) -> bool {
        match self {
            SidecarLine::ViewGeometry { labels, .. } => labels.iter().any(|l| l == view_token),
            _ => false,
        }
    }
}

fn parse_view_geometry(tokens: &[&str]) -> Option<SidecarLine> {
    let lines_at = field_position(tokens, LINES)?;
    let pixels_at = field_position(tokens, PIXELS_PER_LINE)?;

    let labels_end = lines_at.min(pixels_at);
    if labels_end == 0 {
        return None;
    }

    let rows = positive_value(tokens, lines_at)?;
    let cols = positive_value(tokens, pixels_at)?;

    Some(SidecarLine::ViewGeometry {
        labels: tokens[..labels_end].iter().map(|t| t.to_string()).collect(),
        rows,
        cols,
        bits_per_pixel: field_position(tokens, BITS_PER_PIXEL)
            .and_then(|at| positive_value(tokens, at)),
        resolution: field_position(tokens, RESOLUTION).and_then(|at| positive_value(tokens, at)),
        has_overlay: tokens[labels_end..].contains(&OVERLAY),
    })
}

fn field_position(tokens: &[&str], field: &str) -> Option<usize> {
    tokens.iter().position(|t| *t == field)
}

/// Integer following the field at `at`, rejected when missing, malformed or zero
fn positive_value(tokens: &[&str], at: usize) -> Option<u32> {
    tokens
        .get(at + 1)
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_full_geometry_line() {
        let line = SidecarLine::parse(
            "LEFT_CC LINES 4696 PIXELS_PER_LINE 3024 BITS_PER_PIXEL 12 RESOLUTION 50 OVERLAY",
        );
        assert_eq!(
            line,
            SidecarLine::ViewGeometry {
                labels: vec!["LEFT_CC".to_string()],
                rows: 4696,
                cols: 3024,
                bits_per_pixel: Some(12),
                resolution: Some(50),
                has_overlay: true,
            }
        );
        assert!(line.declares_view("LEFT_CC"));
        assert!(!line.declares_view("RIGHT_CC"));
        assert!(!line.declares_view("CC"));
    }

    #[test]
    fn test_parse_non_overlay_geometry_line() {
        let line = SidecarLine::parse(
            "RIGHT_MLO LINES 4616 PIXELS_PER_LINE 2992 BITS_PER_PIXEL 12 RESOLUTION 50 NON_OVERLAY",
        );
        match line {
            SidecarLine::ViewGeometry {
                rows,
                cols,
                has_overlay,
                ..
            } => {
                assert_eq!((rows, cols), (4616, 2992));
                assert!(!has_overlay);
            }
            other => panic!("unexpected line: {:?}", other),
        }
    }

    #[test]
    fn test_parse_minimal_geometry_line() {
        let line = SidecarLine::parse("  RIGHT_CC LINES 4096 PIXELS_PER_LINE 2048");
        assert_eq!(
            line,
            SidecarLine::ViewGeometry {
                labels: vec!["RIGHT_CC".to_string()],
                rows: 4096,
                cols: 2048,
                bits_per_pixel: None,
                resolution: None,
                has_overlay: false,
            }
        );
    }

    #[test]
    fn test_parse_digitizer_line() {
        assert_eq!(
            SidecarLine::parse("DIGITIZER LUMISYS LASER"),
            SidecarLine::Digitizer {
                name: "lumisys".to_string()
            }
        );
        assert_eq!(
            SidecarLine::parse("DIGITIZER DBA 21"),
            SidecarLine::Digitizer {
                name: "dba".to_string()
            }
        );
        assert_eq!(
            SidecarLine::parse("  \tDIGITIZER HOWTEK"),
            SidecarLine::Digitizer {
                name: "howtek".to_string()
            }
        );
    }

    #[rstest]
    #[case("")]
    #[case("ics_version 1.0")]
    #[case("filename A-1234-1")]
    #[case("DIGITIZER")]
    #[case("SEQUENCE DIGITIZER HOWTEK")]
    #[case("digitizer HOWTEK")]
    #[case("Digitizer HOWTEK")]
    #[case("LEFT_CC LINES abc PIXELS_PER_LINE 3024")]
    #[case("LEFT_CC LINES 4696")]
    #[case("LEFT_CC LINES 0 PIXELS_PER_LINE 3024")]
    #[case("LEFT_CC LINES 4696 PIXELS_PER_LINE -3")]
    #[case("LINES 4696 PIXELS_PER_LINE 3024")]
    fn test_parse_other_lines(#[case] input: &str) {
        assert_eq!(SidecarLine::parse(input), SidecarLine::Other);
    }
}
