use std::path::Path;

/// Characters treated as junk between the tag and the title part.
pub const SEPARATORS: &[char] = &[' ', '.', '-', '_'];

/// Build the fixed-width `SxxExx` tag for a season/episode pair.
///
/// Widths grow naturally past 99 (`S01E102`), matching the zero-padded
/// two-digit minimum.
pub fn episode_tag(season: u32, episode: u32) -> String {
    format!("S{:02}E{:02}", season, episode)
}

/// Compute the target filename for one file.
///
/// `ext` is the original extension including its leading dot (empty for
/// extensionless files) and is carried over with its original case. With
/// `keep_titles` the original stem survives as a ` - title` suffix; a stem
/// that is already correctly tagged is reproduced unchanged, which keeps
/// repeated previews idempotent.
pub fn build_new_name(
    season: u32,
    episode: u32,
    ext: &str,
    keep_titles: bool,
    original_name: &str,
) -> String {
    let tag = episode_tag(season, episode);

    if !keep_titles {
        return format!("{tag}{ext}");
    }

    let stem = Path::new(original_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(original_name);

    let cleaned = stem.trim_start_matches(SEPARATORS);

    let title_part = if starts_with_tag(cleaned, &tag) {
        cleaned[tag.len()..].trim_start_matches(SEPARATORS)
    } else {
        cleaned
    };

    if title_part.is_empty() {
        format!("{tag}{ext}")
    } else {
        format!("{tag} - {title_part}{ext}")
    }
}

/// ASCII case-insensitive tag prefix check.
///
/// The tag is pure ASCII, so when the prefix matches, `tag.len()` is a valid
/// char boundary in `name` and the remainder can be sliced off directly.
fn starts_with_tag(name: &str, tag: &str) -> bool {
    name.get(..tag.len())
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_formatting() {
        assert_eq!(episode_tag(1, 5), "S01E05");
        assert_eq!(episode_tag(12, 34), "S12E34");
        assert_eq!(episode_tag(0, 0), "S00E00");
    }

    #[test]
    fn test_tag_grows_past_two_digits() {
        assert_eq!(episode_tag(1, 102), "S01E102");
        assert_eq!(episode_tag(100, 7), "S100E07");
    }

    #[test]
    fn test_without_titles() {
        let name = build_new_name(2, 3, ".mkv", false, "Some Show - Pilot.mkv");
        assert_eq!(name, "S02E03.mkv");
    }

    #[test]
    fn test_keeps_title() {
        let name = build_new_name(1, 1, ".mp4", true, "Pilot.mp4");
        assert_eq!(name, "S01E01 - Pilot.mp4");
    }

    #[test]
    fn test_strips_leading_separators() {
        let name = build_new_name(1, 2, ".mkv", true, " .-_Second Episode.mkv");
        assert_eq!(name, "S01E02 - Second Episode.mkv");
    }

    #[test]
    fn test_already_tagged_is_unchanged() {
        let name = build_new_name(1, 5, ".mkv", true, "S01E05 - Pilot.mkv");
        assert_eq!(name, "S01E05 - Pilot.mkv");
    }

    #[test]
    fn test_already_tagged_bare_is_unchanged() {
        let name = build_new_name(3, 9, ".avi", true, "S03E09.avi");
        assert_eq!(name, "S03E09.avi");
    }

    #[test]
    fn test_tag_for_another_slot_is_kept_as_title() {
        // Only the tag for the assigned slot is stripped; a file tagged for
        // a different slot keeps its whole name as the title.
        let name = build_new_name(1, 7, ".mkv", true, "S01E05 - Pilot.mkv");
        assert_eq!(name, "S01E07 - S01E05 - Pilot.mkv");
    }

    #[test]
    fn test_tag_match_is_case_insensitive() {
        let name = build_new_name(1, 5, ".mkv", true, "s01e05.pilot.mkv");
        assert_eq!(name, "S01E05 - pilot.mkv");
    }

    #[test]
    fn test_separator_only_title_is_dropped() {
        let name = build_new_name(1, 5, ".mkv", true, "S01E05 - ---.mkv");
        assert_eq!(name, "S01E05.mkv");
    }

    #[test]
    fn test_title_with_inner_dots_survives() {
        let name = build_new_name(1, 4, ".mp4", true, "My.Show.2019.mp4");
        assert_eq!(name, "S01E04 - My.Show.2019.mp4");
    }

    #[test]
    fn test_extension_case_is_preserved() {
        let name = build_new_name(1, 1, ".MKV", true, "Opener.MKV");
        assert_eq!(name, "S01E01 - Opener.MKV");
    }

    #[test]
    fn test_empty_extension() {
        let name = build_new_name(1, 1, "", false, "raw-capture");
        assert_eq!(name, "S01E01");
    }
}
