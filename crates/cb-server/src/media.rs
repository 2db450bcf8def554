use std::path::Path;

/// Extensions the ad player understands.
const VIDEO_EXTENSIONS: [&str; 3] = [".mp4", ".webm", ".ogg"];

/// List ad video file names in `dir`, sorted for stable output.
///
/// A missing or unreadable directory yields an empty list, not an error.
pub fn list_ad_videos(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| {
            let lower = name.to_ascii_lowercase();
            VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
        })
        .collect();
    files.sort();
    files
}
