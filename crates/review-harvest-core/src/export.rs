use anyhow::{Context, Result};
use review_harvest_models::NormalizedReview;
use std::io::Write;
use std::path::Path;

/// Export field order. Stable: downstream sinks rely on this exact shape and
/// nothing may reorder or drop columns.
pub const EXPORT_FIELDS: [&str; 8] = [
    "Votes Up",
    "Playtime",
    "Purchased",
    "Author",
    "Recommended",
    "Review",
    "Posted At",
    "Language",
];

/// One admitted review as a flat record matching `EXPORT_FIELDS`.
pub fn export_row(review: &NormalizedReview) -> [String; 8] {
    [
        review.votes_up.to_string(),
        format!("{:.1} hrs", review.playtime_hours),
        if review.steam_purchase { "Yes" } else { "No" }.to_string(),
        review.author.clone(),
        if review.voted_up { "👍" } else { "👎" }.to_string(),
        review.body.clone(),
        review.posted_at_str(),
        review.language.clone(),
    ]
}

pub fn write_csv<W: Write>(writer: W, reviews: &[NormalizedReview]) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(EXPORT_FIELDS)?;
    for review in reviews {
        csv_writer.write_record(export_row(review))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_csv_file(path: &Path, reviews: &[NormalizedReview]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating export directory {}", parent.display()))?;
        }
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating export file {}", path.display()))?;
    write_csv(file, reviews).with_context(|| format!("writing CSV to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn review() -> NormalizedReview {
        let posted_at =
            NaiveDateTime::parse_from_str("2025-03-10 12:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        NormalizedReview {
            author: "76561198000000001".to_string(),
            timestamp: posted_at.and_utc().timestamp(),
            posted_at,
            language: "english".to_string(),
            voted_up: true,
            votes_up: 12,
            // Binary-exact so "{:.1}" formatting is deterministic
            playtime_hours: 2.5,
            steam_purchase: true,
            body: "solid game, would play again".to_string(),
        }
    }

    #[test]
    fn test_row_matches_field_order() {
        let row = export_row(&review());
        assert_eq!(row.len(), EXPORT_FIELDS.len());
        assert_eq!(row[0], "12");
        assert_eq!(row[1], "2.5 hrs");
        assert_eq!(row[2], "Yes");
        assert_eq!(row[3], "76561198000000001");
        assert_eq!(row[4], "👍");
        assert_eq!(row[5], "solid game, would play again");
        assert_eq!(row[6], "2025-03-10 12:30:00");
        assert_eq!(row[7], "english");
    }

    #[test]
    fn test_csv_header_and_rows() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[review()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Votes Up,Playtime,Purchased,Author,Recommended,Review,Posted At,Language"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("12,2.5 hrs,Yes,76561198000000001,👍,"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exports").join("reviews.csv");
        write_csv_file(&path, &[review(), review()]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}
