/// Pulls positional values out of a flat text payload.
///
/// For every occurrence of `marker` the value is the text after the marker up to
/// (not including) the next comma, or to the end of the text when no comma
/// follows. The last value may therefore carry trailing noise.
#[derive(Debug, Clone)]
pub struct FieldScanner {
    marker: String,
}

impl FieldScanner {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn scan(&self, text: &str) -> Vec<String> {
        scan_for_key_values(&self.marker, text)
    }
}

/// Values following each occurrence of `marker`, left to right.
///
/// An empty marker matches nothing.
pub fn scan_for_key_values(marker: &str, text: &str) -> Vec<String> {
    let mut values = Vec::new();
    if marker.is_empty() {
        return values;
    }

    let mut rest = text;
    while let Some(idx) = rest.find(marker) {
        let tail = &rest[idx + marker.len()..];
        let value = match tail.find(',') {
            Some(end) => &tail[..end],
            None => tail,
        };
        values.push(value.to_string());
        // 從 marker 之後繼續搜尋
        rest = tail;
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID_MARKER: &str = "\"id\":";

    #[test]
    fn test_scan_returns_values_in_order_of_occurrence() {
        let text = r#"{"results":[{"id":3,"title":"C"},{"id":1,"title":"A"},{"id":2,"title":"B"}]}"#;
        assert_eq!(scan_for_key_values(ID_MARKER, text), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_scan_without_marker_returns_empty() {
        assert!(scan_for_key_values(ID_MARKER, r#"{"page":1,"results":[]}"#).is_empty());
        assert!(scan_for_key_values(ID_MARKER, "").is_empty());
    }

    #[test]
    fn test_scan_value_stops_at_first_comma() {
        let values = scan_for_key_values("name=", "name=alpha beta,x,name=,y");
        assert_eq!(values, vec!["alpha beta", ""]);
    }

    #[test]
    fn test_last_value_without_comma_keeps_tail() {
        let values = scan_for_key_values(ID_MARKER, r#"{"id":7,"title":"X"},{"id":9}]}"#);
        assert_eq!(values, vec!["7", "9}]}"]);
    }

    #[test]
    fn test_tail_without_comma_swallows_later_markers() {
        let values = scan_for_key_values("k:", "k:1,k:2 k:3");
        assert_eq!(values, vec!["1", "2 k:3", "3"]);
    }

    #[test]
    fn test_empty_marker_matches_nothing() {
        assert!(scan_for_key_values("", "a,b,c").is_empty());
    }

    #[test]
    fn test_genre_ids_do_not_match_id_marker() {
        let text = r#"{"genre_ids":[28,12],"id":550,"title":"Fight Club"}"#;
        assert_eq!(scan_for_key_values(ID_MARKER, text), vec!["550"]);
    }

    #[test]
    fn test_multibyte_text_is_sliced_on_char_boundaries() {
        let values = scan_for_key_values("片名:", "片名:千と千尋,片名:天気の子");
        assert_eq!(values, vec!["千と千尋", "天気の子"]);
    }

    #[test]
    fn test_large_payload_does_not_grow_stack() {
        let text = "\"id\":1,".repeat(200_000);
        let values = FieldScanner::new(ID_MARKER).scan(&text);
        assert_eq!(values.len(), 200_000);
        assert!(values.iter().all(|v| v == "1"));
    }
}
