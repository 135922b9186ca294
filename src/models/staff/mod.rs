// Staff module
// Roster records referenced by daily assignments

use serde::{Deserialize, Serialize};
use std::fmt;

use super::shift::Position;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(pub String);

impl From<&str> for StaffId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StaffId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    Employee,
    Partner,
    Flower,
}

impl EmploymentType {
    pub fn label(&self) -> &'static str {
        match self {
            EmploymentType::Employee => "社員",
            EmploymentType::Partner => "パートナー",
            EmploymentType::Flower => "フラワー",
        }
    }
}

/// A member of staff on the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    pub initials: String,
    pub employment_type: EmploymentType,
    pub primary_position: Position,
    pub color: String,
}

impl Staff {
    /// Create a staff record; initials are taken from the first character of the name.
    pub fn new(
        id: impl Into<StaffId>,
        name: impl Into<String>,
        employment_type: EmploymentType,
        primary_position: Position,
        color: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            initials: initials_of(&name),
            name,
            employment_type,
            primary_position,
            color: color.into(),
        }
    }

    /// Rename and re-derive the initials.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.initials = initials_of(&self.name);
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Staff name cannot be empty".to_string());
        }
        if self.initials.is_empty() {
            return Err("Staff initials cannot be empty".to_string());
        }
        if !self.color.starts_with('#') || (self.color.len() != 7 && self.color.len() != 4) {
            return Err("Color must be in hex format (#RRGGBB or #RGB)".to_string());
        }
        Ok(())
    }
}

fn initials_of(name: &str) -> String {
    name.trim().chars().next().map(String::from).unwrap_or_default()
}

/// The staff list shown in the pool beside the daily grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    members: Vec<Staff>,
}

impl Roster {
    pub fn new(members: Vec<Staff>) -> Self {
        Self { members }
    }

    /// Seven sample staff covering every position and employment type.
    pub fn demo() -> Self {
        use EmploymentType::*;
        use Position::*;
        Self::new(vec![
            Staff::new("s1", "田中 一郎", Employee, Grill, "#EF4444"),
            Staff::new("s2", "佐藤 花子", Partner, Salad, "#22C55E"),
            Staff::new("s3", "鈴木 健", Partner, Bento, "#F97316"),
            Staff::new("s4", "高橋 優", Employee, Hall, "#14B8A6"),
            Staff::new("s5", "伊藤 舞", Flower, PcPacking, "#3B82F6"),
            Staff::new("s6", "渡辺 翔", Partner, Hall, "#0D9488"),
            Staff::new("s7", "山本 玲奈", Partner, Salad, "#16A34A"),
        ])
    }

    pub fn members(&self) -> &[Staff] {
        &self.members
    }

    pub fn get(&self, id: &StaffId) -> Option<&Staff> {
        self.members.iter().find(|staff| &staff.id == id)
    }

    /// Replace the record with the same id, or append it.
    pub fn upsert(&mut self, staff: Staff) -> Result<(), String> {
        staff.validate()?;
        match self.members.iter_mut().find(|existing| existing.id == staff.id) {
            Some(existing) => *existing = staff,
            None => self.members.push(staff),
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
