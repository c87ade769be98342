use chrono::NaiveDate;

/// Which of the three tracked dates a gap is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GapKind {
    Candidate,
    Client,
    Remark,
}

impl GapKind {
    pub const ALL: [GapKind; 3] = [GapKind::Candidate, GapKind::Client, GapKind::Remark];

    pub fn from_strng(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "candidate" => Some(GapKind::Candidate),
            "client" => Some(GapKind::Client),
            "remark" => Some(GapKind::Remark),
            _ => None,
        }
    }
}

/// Whole days elapsed since `date`, not counting today, floored at zero.
///
/// A date of today or yesterday gives 0, two days ago gives 1. Future dates
/// give 0. A missing date gives 0.
pub fn gap(date: Option<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(date) = date else {
        return 0;
    };
    let diff = today.signed_duration_since(date).num_days() - 1;
    diff.max(0) as u32
}

/// The three gaps of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowGaps {
    pub candidate: u32,
    pub client: u32,
    pub remark: u32,
}

impl RowGaps {
    pub fn get(&self, kind: GapKind) -> u32 {
        match kind {
            GapKind::Candidate => self.candidate,
            GapKind::Client => self.client,
            GapKind::Remark => self.remark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_boundaries() {
        let t = today();
        assert_eq!(gap(Some(t), t), 0);
        assert_eq!(gap(Some(t - Duration::days(1)), t), 0);
        assert_eq!(gap(Some(t - Duration::days(2)), t), 1);
        assert_eq!(gap(Some(t - Duration::days(30)), t), 29);
        println!("✓ Today and yesterday give 0, two days ago gives 1");
    }

    #[test]
    fn test_missing_date() {
        assert_eq!(gap(None, today()), 0);
        assert_eq!(gap(None, NaiveDate::MIN), 0);
        assert_eq!(gap(None, NaiveDate::MAX), 0);
        println!("✓ No date means no gap");
    }

    #[test]
    fn test_future_date_clamped() {
        let t = today();
        assert_eq!(gap(Some(t + Duration::days(10)), t), 0);
        println!("✓ Future dates clamp to 0");
    }

    #[test]
    fn test_monotonic_in_today() {
        let date = Some(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let mut previous = 0;
        for offset in -5..60 {
            let t = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap() + Duration::days(offset);
            let g = gap(date, t);
            assert!(g >= previous, "gap dropped at offset {}", offset);
            previous = g;
        }
        println!("✓ Gap never decreases as today advances");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(GapKind::from_strng("Candidate"), Some(GapKind::Candidate));
        assert_eq!(GapKind::from_strng("REMARK"), Some(GapKind::Remark));
        assert_eq!(GapKind::from_strng("status"), None);
        println!("✓ Gap kinds parse from names");
    }
}
