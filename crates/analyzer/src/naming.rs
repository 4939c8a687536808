//! Resource key derivation and casing helpers

/// Longest string prefix shared by every word
///
/// Returns an empty string when there are fewer than two words or nothing in
/// common. Comparison is character-wise, so the prefix may end mid-segment.
pub fn find_prefix<S: AsRef<str>>(words: &[S]) -> String {
    if words.len() < 2 {
        return String::new();
    }

    let first = words[0].as_ref();
    let mut end = first.len();

    for word in &words[1..] {
        let common = first
            .char_indices()
            .zip(word.as_ref().chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map(|((i, c), _)| i + c.len_utf8())
            .unwrap_or(0);
        end = end.min(common);
    }

    first[..end].to_string()
}

/// Build a TitleCase key from the literal segments of a path template
///
/// Parameter segments are skipped; every run of letters and digits is
/// capitalized and the runs are concatenated, e.g. `/image-boards/{id}/assets`
/// becomes `ImageBoardsAssets`.
pub fn resource_key_from_path(path: &str) -> String {
    let mut result = String::new();

    for segment in path.split('/') {
        if segment.starts_with('{') {
            continue;
        }

        let mut capitalize_next = true;
        for c in segment.chars() {
            if !c.is_alphanumeric() {
                capitalize_next = true;
                continue;
            }

            if capitalize_next {
                result.extend(c.to_uppercase());
                capitalize_next = false;
            } else {
                result.push(c);
            }
        }
    }

    result
}

/// Resource key of a path once the prefix shared by all paths is removed
///
/// Falls back to the full path when stripping leaves no literal text.
pub fn derive_resource_key(path: &str, prefix: &str) -> String {
    let key = resource_key_from_path(path.strip_prefix(prefix).unwrap_or(path));
    if key.is_empty() {
        resource_key_from_path(path)
    } else {
        key
    }
}

/// Convert PascalCase or camelCase to snake_case
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            // Break before an uppercase letter that follows a lowercase letter
            // or digit, or that starts a new word after a run of capitals
            // (HTTPServer -> http_server).
            let should_add_underscore = i > 0
                && (chars[i - 1].is_lowercase()
                    || chars[i - 1].is_ascii_digit()
                    || (i + 1 < chars.len() && chars[i + 1].is_lowercase()));

            if should_add_underscore && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else if ch.is_alphanumeric() {
            result.push(ch);
        } else if !result.is_empty() && !result.ends_with('_') {
            result.push('_');
        }
    }

    result.trim_matches('_').to_string()
}

/// Convert snake_case or kebab-case to TitleCase
pub fn to_title_case(s: &str) -> String {
    let mut result = String::new();
    let mut upper_next = true;

    for c in s.chars() {
        if !c.is_alphabetic() {
            upper_next = true;
            if c.is_ascii_digit() {
                result.push(c);
            }
            continue;
        }

        if upper_next {
            result.extend(c.to_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_prefix() {
        assert_eq!(find_prefix(&["/v3/boards", "/v3/boards/{id}", "/v3/assets"]), "/v3/");
        assert_eq!(find_prefix(&["/boards", "/boards/{id}"]), "/boards");
        assert_eq!(find_prefix(&["/a", "/b"]), "/");
        assert_eq!(find_prefix(&["boards", "assets"]), "");
    }

    #[test]
    fn test_find_prefix_needs_two_words() {
        assert_eq!(find_prefix(&["/boards"]), "");
        assert_eq!(find_prefix::<&str>(&[]), "");
        assert_eq!(find_prefix(&["", "/boards"]), "");
    }

    #[test]
    fn test_find_prefix_multibyte() {
        assert_eq!(find_prefix(&["/café/a", "/café/b"]), "/café/");
        assert_eq!(find_prefix(&["/é", "/è"]), "/");
    }

    #[test]
    fn test_resource_key_from_path() {
        assert_eq!(resource_key_from_path("/boards"), "Boards");
        assert_eq!(resource_key_from_path("/boards/{id}"), "Boards");
        assert_eq!(
            resource_key_from_path("/image-boards/{id}/assets"),
            "ImageBoardsAssets"
        );
        assert_eq!(resource_key_from_path("/v1/user_groups"), "V1UserGroups");
        assert_eq!(resource_key_from_path("/{id}"), "");
    }

    #[test]
    fn test_derive_resource_key_falls_back_to_full_path() {
        let prefix = find_prefix(&["/boards", "/boards/{id}"]);
        assert_eq!(derive_resource_key("/boards", &prefix), "Boards");
        assert_eq!(derive_resource_key("/boards/{id}", &prefix), "Boards");

        let prefix = find_prefix(&["/v3/boards", "/v3/assets/{id}"]);
        assert_eq!(derive_resource_key("/v3/boards", &prefix), "Boards");
        assert_eq!(derive_resource_key("/v3/assets/{id}", &prefix), "Assets");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Boards"), "boards");
        assert_eq!(to_snake_case("ImageBoards"), "image_boards");
        assert_eq!(to_snake_case("HTTPServer"), "http_server");
        assert_eq!(to_snake_case("namespaceName"), "namespace_name");
        assert_eq!(to_snake_case("V1Quota"), "v1_quota");
        assert_eq!(to_snake_case("some-resource"), "some_resource");
    }

    #[test]
    fn test_to_title_case() {
        assert_eq!(to_title_case("image_boards"), "ImageBoards");
        assert_eq!(to_title_case("region-limit"), "RegionLimit");
        assert_eq!(to_title_case("disk_mb2"), "DiskMb2");
    }
}
