use crate::config::ColumnNames;
use crate::error::{Result, TrackerError};
use crate::gap::GapKind;
use crate::store::TableStore;
use std::collections::HashMap;

/// What a tracked column means to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    CandidateDate,
    CandidateFollowup,
    ClientDate,
    ClientFollowup,
    Status,
    RemarkDate,
    CandidateGap,
    ClientGap,
    RemarkGap,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 9] = [
        ColumnRole::CandidateDate,
        ColumnRole::CandidateFollowup,
        ColumnRole::ClientDate,
        ColumnRole::ClientFollowup,
        ColumnRole::Status,
        ColumnRole::RemarkDate,
        ColumnRole::CandidateGap,
        ColumnRole::ClientGap,
        ColumnRole::RemarkGap,
    ];

    /// Columns a full recompute reads from or writes to.
    pub const RECALC: [ColumnRole; 6] = [
        ColumnRole::CandidateDate,
        ColumnRole::ClientDate,
        ColumnRole::RemarkDate,
        ColumnRole::CandidateGap,
        ColumnRole::ClientGap,
        ColumnRole::RemarkGap,
    ];

    pub fn header_name(self, names: &ColumnNames) -> &str {
        match self {
            ColumnRole::CandidateDate => &names.candidate_date,
            ColumnRole::CandidateFollowup => &names.candidate_followup,
            ColumnRole::ClientDate => &names.client_date,
            ColumnRole::ClientFollowup => &names.client_followup,
            ColumnRole::Status => &names.status,
            ColumnRole::RemarkDate => &names.remark_date,
            ColumnRole::CandidateGap => &names.candidate_gap,
            ColumnRole::ClientGap => &names.client_gap,
            ColumnRole::RemarkGap => &names.remark_gap,
        }
    }

    pub fn date_of(kind: GapKind) -> Self {
        match kind {
            GapKind::Candidate => ColumnRole::CandidateDate,
            GapKind::Client => ColumnRole::ClientDate,
            GapKind::Remark => ColumnRole::RemarkDate,
        }
    }

    pub fn gap_of(kind: GapKind) -> Self {
        match kind {
            GapKind::Candidate => ColumnRole::CandidateGap,
            GapKind::Client => ColumnRole::ClientGap,
            GapKind::Remark => ColumnRole::RemarkGap,
        }
    }
}

/// Column positions resolved from the header row.
///
/// Resolve once per batch run or edit session and pass it around. Lookups
/// for a name missing from the header return `None` rather than failing;
/// use [`Schema::require`] where a missing column must abort.
#[derive(Debug, Clone)]
pub struct Schema {
    names: ColumnNames,
    indices: HashMap<ColumnRole, usize>,
}

impl Schema {
    pub fn from_header(header: &[String], names: &ColumnNames) -> Self {
        let mut indices = HashMap::new();
        for role in ColumnRole::ALL {
            let wanted = role.header_name(names);
            if let Some(pos) = header.iter().position(|h| h.trim() == wanted) {
                indices.insert(role, pos + 1);
            }
        }
        Schema {
            names: names.clone(),
            indices,
        }
    }

    pub fn resolve<S: TableStore + ?Sized>(store: &S, names: &ColumnNames) -> Result<Self> {
        let header = store.header_row()?;
        Ok(Self::from_header(&header, names))
    }

    /// 1-based index of `role`, if its header is present.
    pub fn index(&self, role: ColumnRole) -> Option<usize> {
        self.indices.get(&role).copied()
    }

    /// 1-based index of `role`, or `MissingColumn` naming the header.
    pub fn index_or_err(&self, role: ColumnRole) -> Result<usize> {
        self.index(role)
            .ok_or_else(|| TrackerError::MissingColumn(role.header_name(&self.names).to_string()))
    }

    /// Fails on the first role in `roles` that is absent from the header.
    pub fn require(&self, roles: &[ColumnRole]) -> Result<()> {
        for &role in roles {
            self.index_or_err(role)?;
        }
        Ok(())
    }

    /// Checks every tracked column up front, for callers that would rather
    /// fail at startup than have live edits silently skip a missing column.
    pub fn validate(&self) -> Result<()> {
        self.require(&ColumnRole::ALL)
    }

    /// Role of the column at 1-based `col`, if it is a tracked one.
    ///
    /// When two roles share a header the first in [`ColumnRole::ALL`] order
    /// wins.
    pub fn role_at(&self, col: usize) -> Option<ColumnRole> {
        ColumnRole::ALL
            .into_iter()
            .find(|&role| self.index(role) == Some(col))
    }

    pub fn names(&self) -> &ColumnNames {
        &self.names
    }
}
