//! Capability names
//!
//! Every feature module the portal knows about is a variant of
//! [`CapabilityId`]. The set is closed: adding a module means adding a
//! variant here, and the built-in implementation binding is an exhaustive
//! `match` over this enum, so a module without a loader fails to compile.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reserved navigation target for the dashboard home
pub const OVERVIEW: &str = "overview";

macro_rules! capability_ids {
    ($( $(#[$meta:meta])* $variant:ident => $name:literal, )+) => {
        /// Capability name
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum CapabilityId {
            $( $(#[$meta])* #[serde(rename = $name)] $variant, )+
        }

        impl CapabilityId {
            /// All capability names, sentinel included, in declaration order
            pub const ALL: &'static [CapabilityId] = &[ $( CapabilityId::$variant, )+ ];

            /// Wire name
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )+
                }
            }

            /// Look up a capability by wire name
            pub fn parse(raw: &str) -> Option<Self> {
                match raw {
                    $( $name => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }
    };
}

capability_ids! {
    /// Dashboard home; never loaded, never shown as a tile
    Overview => "overview",

    Timetable => "timetable",
    Attendance => "attendance",
    Homework => "homework",
    LessonPlanner => "lesson_planner",
    CourseCatalog => "course_catalog",
    DigitalLibrary => "digital_library",
    LabScheduler => "lab_scheduler",
    ClinicalRotations => "clinical_rotations",
    TradeWorkshop => "trade_workshop",

    OnlineExam => "online_exam",
    QuestionBank => "question_bank",
    ReportCards => "report_cards",
    MockTests => "mock_tests",

    Admissions => "admissions",
    VisitorLog => "visitor_log",
    Transport => "transport",
    Hostel => "hostel",
    Inventory => "inventory",
    Certificates => "certificates",

    FeeManagement => "fee_management",
    Payroll => "payroll",
    ExpenseTracker => "expense_tracker",
    Scholarships => "scholarships",

    NoticeBoard => "notice_board",
    CampusChat => "campus_chat",
    Circulars => "circulars",
    ParentMeetings => "parent_meetings",
    BulkMessaging => "bulk_messaging",

    Canteen => "canteen",
    EventsCalendar => "events_calendar",
    Clubs => "clubs",
    SportsCenter => "sports_center",

    SmartHrManager => "smart_hr_manager",
    LeaveManagement => "leave_management",
    Recruitment => "recruitment",

    PlacementCell => "placement_cell",
    Internships => "internships",
    AlumniNetwork => "alumni_network",

    AiTutor => "ai_tutor",
    AiLessonGenerator => "ai_lesson_generator",

    PerformanceInsights => "performance_insights",
    InstitutionAnalytics => "institution_analytics",
    ComplianceReports => "compliance_reports",
}

impl CapabilityId {
    /// Sentinels are navigation targets without an implementation
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::Overview)
    }

    /// Every non-sentinel capability
    pub fn loadable() -> impl Iterator<Item = CapabilityId> {
        Self::ALL.iter().copied().filter(|id| !id.is_sentinel())
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name that does not belong to the capability set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown capability: {0}")]
pub struct UnknownCapability(pub String);

impl FromStr for CapabilityId {
    type Err = UnknownCapability;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownCapability(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = CapabilityId::ALL.iter().map(|id| id.as_str()).collect();
        assert_eq!(names.len(), CapabilityId::ALL.len());
    }

    #[test]
    fn test_parse_matches_serde() {
        for id in CapabilityId::ALL {
            assert_eq!(CapabilityId::parse(id.as_str()), Some(*id));
            let json = serde_json::to_string(id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn test_overview_is_only_sentinel() {
        assert_eq!(CapabilityId::parse(OVERVIEW), Some(CapabilityId::Overview));
        assert!(CapabilityId::Overview.is_sentinel());
        assert_eq!(CapabilityId::loadable().count(), CapabilityId::ALL.len() - 1);
    }

    #[test]
    fn test_unknown_name() {
        assert!(CapabilityId::parse("time_machine").is_none());
        assert!("Timetable".parse::<CapabilityId>().is_err());
    }
}
