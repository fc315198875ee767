use serde::{Deserialize, Serialize};

/// Division label for stations that match no declared member.
pub const OTHER_DIVISION: &str = "Other";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberCount {
    pub member: String,
    pub count: u64,
}

impl MemberCount {
    pub fn new(member: impl Into<String>, count: u64) -> Self {
        Self {
            member: member.into(),
            count,
        }
    }
}

/// One column block of the report: a division and its sorted members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionGroup {
    pub division: String,
    pub members: Vec<MemberCount>,
}

impl DivisionGroup {
    pub fn new(division: impl Into<String>, members: Vec<MemberCount>) -> Self {
        Self {
            division: division.into(),
            members,
        }
    }

    pub fn subtotal(&self) -> u64 {
        self.members.iter().map(|member| member.count).sum()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
