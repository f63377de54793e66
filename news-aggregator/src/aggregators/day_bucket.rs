use crate::types::ArticleRecord;
use rand::seq::SliceRandom;
use rand::Rng;

/// Orders records by publish day, newest first, shuffling within each day.
///
/// Records without a known date share one bucket placed after all dated ones.
pub fn order_by_day<R: Rng + ?Sized>(records: &mut [ArticleRecord], rng: &mut R) {
    records.sort_by(|a, b| b.published_on.cmp(&a.published_on));
    for bucket in records.chunk_by_mut(|a, b| a.published_on == b.published_on) {
        bucket.shuffle(rng);
    }
}

/// Independently shuffled copy; the input is left untouched.
pub fn shuffled_copy<R: Rng + ?Sized>(records: &[ArticleRecord], rng: &mut R) -> Vec<ArticleRecord> {
    let mut copy = records.to_vec();
    copy.shuffle(rng);
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UNKNOWN_DATE;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn on(day: Option<(i32, u32, u32)>, link: &str) -> ArticleRecord {
        let published_on = day.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        ArticleRecord {
            title: link.to_string(),
            link: link.to_string(),
            pub_date: published_on
                .map(|d| d.format("%B %-d, %Y").to_string())
                .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
            description: String::new(),
            source: "test".to_string(),
            image_url: String::new(),
            published_on,
        }
    }

    #[test]
    fn days_descend_and_unknown_is_last() {
        let mut records = vec![
            on(None, "u1"),
            on(Some((2024, 1, 1)), "old"),
            on(Some((2024, 3, 5)), "new-a"),
            on(Some((2024, 2, 1)), "mid"),
            on(Some((2024, 3, 5)), "new-b"),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        order_by_day(&mut records, &mut rng);

        let days: Vec<_> = records.iter().map(|r| r.published_on).collect();
        let mut expected = days.clone();
        expected.sort_by(|a, b| b.cmp(a));
        assert_eq!(days, expected);
        assert_eq!(records.last().unwrap().link, "u1");

        let top: HashSet<_> = records[..2].iter().map(|r| r.link.as_str()).collect();
        assert_eq!(top, HashSet::from(["new-a", "new-b"]));
    }

    #[test]
    fn same_day_order_varies_between_runs() {
        let base: Vec<_> = (0..8)
            .map(|i| on(Some((2024, 3, 5)), &format!("same-{i}")))
            .collect();
        let mut orders = HashSet::new();
        for seed in 0..20 {
            let mut records = base.clone();
            order_by_day(&mut records, &mut StdRng::seed_from_u64(seed));
            orders.insert(records.iter().map(|r| r.link.clone()).collect::<Vec<_>>());
        }
        assert!(orders.len() > 1, "same-day records should not keep insertion order");
    }

    #[test]
    fn shuffled_copy_keeps_membership_and_source() {
        let records: Vec<_> = (0..10).map(|i| on(Some((2024, 1, i + 1)), &format!("r{i}"))).collect();
        let copy = shuffled_copy(&records, &mut StdRng::seed_from_u64(3));
        assert_eq!(copy.len(), records.len());
        let a: HashSet<_> = records.iter().map(|r| &r.link).collect();
        let b: HashSet<_> = copy.iter().map(|r| &r.link).collect();
        assert_eq!(a, b);
        assert_eq!(records[0].link, "r0");
    }
}
