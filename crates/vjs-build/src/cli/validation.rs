/// Split a comma-separated feature list.
///
/// Whitespace around keys is dropped, as are empty entries, so `"core, hls,"`
/// yields `["core", "hls"]`. Keys are checked against the registry later.
pub fn parse_feature_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}
