use super::model::StringRecord;

/// Characters stripped from both ends of every field.
const FIELD_WHITESPACE: [char; 2] = [' ', '\t'];

/// Split one line on every comma and trim spaces and tabs from each field.
///
/// Never fails: the record always holds `commas + 1` fields. There is no
/// quoting or escaping, and empty fields are kept in place.
///
/// ```
/// use csvline::parse_string_line;
///
/// let rec = parse_string_line(", ,test,");
/// assert_eq!(rec.fields(), &["", "", "test", ""]);
/// ```
pub fn parse_string_line(line: &str) -> StringRecord {
    let fields = line
        .split(',')
        .map(|field| field.trim_matches(FIELD_WHITESPACE.as_slice()).to_string())
        .collect();
    StringRecord::new(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_trims_spaces_and_tabs() {
        let rec = parse_string_line("samples,\t mean, standard deviation , chi squared");
        assert_eq!(
            rec.fields(),
            &["samples", "mean", "standard deviation", "chi squared"]
        );
    }

    #[test]
    fn test_keeps_empty_fields() {
        assert_eq!(parse_string_line(", ,test,").fields(), &["", "", "test", ""]);
        assert_eq!(parse_string_line("a,,b").fields(), &["a", "", "b"]);
        assert_eq!(parse_string_line(",,").fields(), &["", "", ""]);
    }

    #[test]
    fn test_line_without_commas() {
        assert_eq!(parse_string_line("").fields(), &[""]);
        assert_eq!(parse_string_line(" \t ").fields(), &[""]);
        assert_eq!(parse_string_line("  whole line ").fields(), &["whole line"]);
    }

    #[test]
    fn test_only_space_and_tab_are_trimmed() {
        assert_eq!(parse_string_line("\rx\r, y\n").fields(), &["\rx\r", "y\n"]);
        assert_eq!(parse_string_line("\"a, b\"").fields(), &["\"a", "b\""]);
    }

    proptest! {
        #[test]
        fn prop_field_count_is_comma_count_plus_one(line in ".{0,60}") {
            let commas = line.matches(',').count();
            prop_assert_eq!(parse_string_line(&line).len(), commas + 1);
        }

        #[test]
        fn prop_fields_have_no_outer_whitespace(line in "[a-z \t,]{0,40}") {
            for field in parse_string_line(&line).fields() {
                prop_assert!(!field.starts_with([' ', '\t']));
                prop_assert!(!field.ends_with([' ', '\t']));
                prop_assert!(!field.contains(','));
            }
        }

        #[test]
        fn prop_parse_is_deterministic(line in ".{0,60}") {
            prop_assert_eq!(parse_string_line(&line), parse_string_line(&line));
        }
    }
}
