//! Common-prefix reduction of town names.

use crate::error::ResolveError;

/// Returns the longest prefix shared by every string in `towns`.
///
/// Strings are compared `char` by `char`, so multi-byte characters are never
/// split. The scan runs over the shortest element (first one on ties) and
/// stops at the first position where any element differs.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidInput`] if `towns` is empty.
pub fn common_prefix<S: AsRef<str>>(towns: &[S]) -> Result<String, ResolveError> {
    let shortest = towns
        .iter()
        .map(AsRef::as_ref)
        .min_by_key(|town| town.chars().count())
        .ok_or(ResolveError::InvalidInput("towns"))?;

    let mut cursors: Vec<_> = towns.iter().map(|town| town.as_ref().chars()).collect();
    let mut prefix = String::with_capacity(shortest.len());

    for ch in shortest.chars() {
        // Every cursor has at least as many chars left as `shortest`.
        if !cursors.iter_mut().all(|cursor| cursor.next() == Some(ch)) {
            break;
        }
        prefix.push(ch);
    }

    Ok(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_first_mismatch() {
        assert_eq!(common_prefix(&["Shibuya", "Shibakoen"]).unwrap(), "Shib");
        assert_eq!(common_prefix(&["Shibuya", "Shinjuku"]).unwrap(), "Shi");
    }

    #[test]
    fn single_element_is_returned_unchanged() {
        assert_eq!(common_prefix(&["A"]).unwrap(), "A");
        assert_eq!(common_prefix(&["丸の内"]).unwrap(), "丸の内");
    }

    #[test]
    fn empty_element_yields_empty_prefix() {
        assert_eq!(common_prefix(&[""]).unwrap(), "");
        assert_eq!(common_prefix(&["Otsuka", ""]).unwrap(), "");
    }

    #[test]
    fn empty_input_is_rejected() {
        let towns: [&str; 0] = [];
        assert_eq!(
            common_prefix(&towns),
            Err(ResolveError::InvalidInput("towns"))
        );
    }

    #[test]
    fn whole_shortest_when_all_positions_match() {
        assert_eq!(common_prefix(&["Otsuka", "Otsuka2"]).unwrap(), "Otsuka");
        assert_eq!(common_prefix(&["Otsuka2", "Otsuka"]).unwrap(), "Otsuka");
    }

    #[test]
    fn compares_whole_characters_not_bytes() {
        // あ (E3 81 82) and い (E3 81 84) share their first two bytes.
        assert_eq!(common_prefix(&["あ", "い"]).unwrap(), "");
        assert_eq!(common_prefix(&["千駄ヶ谷", "千駄木"]).unwrap(), "千駄");
    }

    #[test]
    fn shortest_is_measured_in_chars() {
        // "大塚" is 2 chars / 6 bytes, "Otsuka" is 6 chars / 6 bytes.
        assert_eq!(common_prefix(&["大塚", "大塚二丁目"]).unwrap(), "大塚");
    }

    #[test]
    fn identical_strings_reduce_to_themselves() {
        assert_eq!(
            common_prefix(&["Marunouchi", "Marunouchi", "Marunouchi"]).unwrap(),
            "Marunouchi"
        );
    }

    #[test]
    fn accepts_owned_strings() {
        let towns = vec!["Kanda".to_string(), "Kandasurugadai".to_string()];
        assert_eq!(common_prefix(&towns).unwrap(), "Kanda");
    }

    #[test]
    fn result_is_prefix_of_every_element_and_no_longer_than_shortest() {
        let samples: &[&[&str]] = &[
            &["Shibuya", "Shibakoen", "Shiba"],
            &["a", "ab", "abc"],
            &["xyz", "abc"],
            &["大手町", "大手町一丁目", "大手"],
            &["", "anything"],
            &["same", "same"],
            &["Ginza1", "Ginza2", "Ginza3", "Ginza"],
        ];

        for towns in samples {
            let prefix = common_prefix(towns).unwrap();
            let min_chars = towns.iter().map(|t| t.chars().count()).min().unwrap();
            assert!(prefix.chars().count() <= min_chars, "{towns:?} -> {prefix:?}");
            for town in *towns {
                assert!(town.starts_with(&prefix), "{town:?} lacks prefix {prefix:?}");
            }
        }
    }
}
