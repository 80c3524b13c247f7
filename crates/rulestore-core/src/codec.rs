//! Conversion between stored rows and in-memory rule tuples.
//!
//! A stored row is `ptype` plus up to [`MAX_FIELDS`] nullable value columns;
//! the canonical in-memory form is an ordered list of strings with no
//! trailing empty entries. Interior empties are preserved: `["", "data1",
//! "read"]` is a different rule from `["data1", "read"]`.

use rulestore_filter::MAX_FIELDS;

/// Trim trailing empty entries, scanning backward from the last position.
///
/// An all-empty tuple canonicalizes to an empty one. Idempotent.
pub fn canonicalize(values: &[String]) -> Vec<String> {
    let end = values
        .iter()
        .rposition(|v| !v.is_empty())
        .map_or(0, |i| i + 1);
    values[..end].to_vec()
}

/// Pair a tuple with the value columns, padding absent positions with NULL.
/// Positions past `v5` are dropped.
pub fn encode(values: &[String]) -> [Option<&str>; MAX_FIELDS] {
    let mut columns = [None; MAX_FIELDS];
    for (i, value) in values.iter().take(MAX_FIELDS).enumerate() {
        columns[i] = Some(value.as_str());
    }
    columns
}

/// Map NULL columns to empty strings, then canonicalize.
pub fn decode(columns: &[Option<String>]) -> Vec<String> {
    let values: Vec<String> = columns
        .iter()
        .map(|c| c.clone().unwrap_or_default())
        .collect();
    canonicalize(&values)
}

/// Render `ptype, v0, v1, ...` for a line-oriented policy loader. The
/// values are canonicalized first, so no trailing empties ever appear.
pub fn to_line(ptype: &str, values: &[String]) -> String {
    let mut parts = vec![ptype.to_string()];
    parts.extend(canonicalize(values));
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuple(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_canonicalize_trims_only_trailing() {
        assert_eq!(
            canonicalize(&tuple(&["", "data1", "read"])),
            tuple(&["", "data1", "read"])
        );
        assert_eq!(
            canonicalize(&tuple(&["data1", "read", "", ""])),
            tuple(&["data1", "read"])
        );
        assert_eq!(canonicalize(&tuple(&["", "", ""])), Vec::<String>::new());
        assert_eq!(canonicalize(&[]), Vec::<String>::new());
    }

    #[test]
    fn test_canonicalize_idempotent() {
        let cases = [
            tuple(&["alice", "data1", "read"]),
            tuple(&["", "data1", "read", ""]),
            tuple(&["", ""]),
        ];
        for case in cases {
            let once = canonicalize(&case);
            assert_eq!(canonicalize(&once), once);
        }
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let values = tuple(&["alice", "data1", "read", ""]);
        let encoded = encode(&values);
        assert_eq!(encoded[2], Some("read"));
        assert_eq!(encoded[3], Some(""));
        assert_eq!(encoded[4], None);

        let columns: Vec<Option<String>> =
            encoded.iter().map(|c| c.map(str::to_string)).collect();
        assert_eq!(decode(&columns), canonicalize(&values));
    }

    #[test]
    fn test_decode_treats_null_as_empty() {
        let columns = vec![
            Some("alice".to_string()),
            None,
            Some("read".to_string()),
            None,
            None,
            None,
        ];
        assert_eq!(decode(&columns), tuple(&["alice", "", "read"]));
    }

    #[test]
    fn test_to_line_drops_trailing_empties() {
        assert_eq!(
            to_line("p", &tuple(&["alice", "data1", "read", "", ""])),
            "p, alice, data1, read"
        );
        assert_eq!(to_line("g", &tuple(&["alice", "data2_admin"])), "g, alice, data2_admin");
    }
}
