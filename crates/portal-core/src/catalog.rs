//! Capability Descriptor Set
//!
//! The catalog of every feature module and the rules that decide who may see
//! it. Built once at startup and read-only afterwards.

use crate::capability::CapabilityId;
use crate::error::{RegistryError, RegistryResult};
use crate::model::{Role, TenantType};
use crate::validation;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Capability category
///
/// Declaration order is the order groups are rendered in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Holds sentinels only
    Home,
    Academics,
    Examinations,
    Administration,
    Finance,
    Communication,
    CampusLife,
    HumanResources,
    Careers,
    AiTools,
    Analytics,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Home,
        Category::Academics,
        Category::Examinations,
        Category::Administration,
        Category::Finance,
        Category::Communication,
        Category::CampusLife,
        Category::HumanResources,
        Category::Careers,
        Category::AiTools,
        Category::Analytics,
    ];

    /// Group heading
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Academics => "Academics",
            Self::Examinations => "Examinations",
            Self::Administration => "Administration",
            Self::Finance => "Finance",
            Self::Communication => "Communication",
            Self::CampusLife => "Campus Life",
            Self::HumanResources => "Human Resources",
            Self::Careers => "Careers",
            Self::AiTools => "AI Tools",
            Self::Analytics => "Analytics",
        }
    }
}

/// Who a descriptor applies to: everyone, or an explicit list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "ScopeRepr<T>",
    into = "ScopeRepr<T>",
    bound(serialize = "T: Clone + Serialize", deserialize = "T: Deserialize<'de>")
)]
pub enum Scope<T> {
    /// Explicitly unrestricted
    Any,
    /// Restricted to the listed values
    Only(Vec<T>),
}

impl<T: PartialEq> Scope<T> {
    pub fn only(values: impl IntoIterator<Item = T>) -> Self {
        Self::Only(values.into_iter().collect())
    }

    /// Does this scope let `value` through?
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::Any => true,
            Self::Only(values) => values.contains(value),
        }
    }

    /// A restricted scope that admits nothing
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Only(values) if values.is_empty())
    }
}

impl<T> Default for Scope<T> {
    fn default() -> Self {
        Self::Any
    }
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum AnyMarker {
    Any,
}

/// On-disk form: the string `"any"` or a list
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ScopeRepr<T> {
    Marker(AnyMarker),
    List(Vec<T>),
}

impl<T> From<ScopeRepr<T>> for Scope<T> {
    fn from(repr: ScopeRepr<T>) -> Self {
        match repr {
            ScopeRepr::Marker(AnyMarker::Any) => Scope::Any,
            ScopeRepr::List(values) => Scope::Only(values),
        }
    }
}

impl<T> From<Scope<T>> for ScopeRepr<T> {
    fn from(scope: Scope<T>) -> Self {
        match scope {
            Scope::Any => ScopeRepr::Marker(AnyMarker::Any),
            Scope::Only(values) => ScopeRepr::List(values),
        }
    }
}

/// Presentation metadata for a tile
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayInfo {
    pub title: String,
    pub short_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localized_description: Option<String>,
    pub icon: String,
}

/// Capability descriptor
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    /// Unique name
    pub name: CapabilityId,
    pub category: Category,
    pub allowed_roles: Scope<Role>,
    /// Omitted means any tenant type
    #[serde(default)]
    pub allowed_tenant_types: Scope<TenantType>,
    pub display: DisplayInfo,
}

impl Descriptor {
    pub fn new(
        name: CapabilityId,
        category: Category,
        allowed_roles: Scope<Role>,
        allowed_tenant_types: Scope<TenantType>,
        title: &str,
        short_description: &str,
        icon: &str,
    ) -> Self {
        Self {
            name,
            category,
            allowed_roles,
            allowed_tenant_types,
            display: DisplayInfo {
                title: title.to_string(),
                short_description: short_description.to_string(),
                localized_description: None,
                icon: icon.to_string(),
            },
        }
    }

    /// Attach a localized description
    pub fn localized(mut self, text: &str) -> Self {
        self.display.localized_description = Some(text.to_string());
        self
    }

    pub fn is_sentinel(&self) -> bool {
        self.name.is_sentinel()
    }
}

/// Catalog file layout: a list of `[[capability]]` tables
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    capability: Vec<Descriptor>,
}

/// Immutable, validated descriptor set
#[derive(Clone, Debug)]
pub struct DescriptorSet {
    descriptors: Vec<Descriptor>,
    index: HashMap<CapabilityId, usize>,
}

impl DescriptorSet {
    /// Validate and freeze a list of descriptors
    pub fn new(descriptors: Vec<Descriptor>) -> RegistryResult<Self> {
        if let Some(err) = RegistryError::from_defects(validation::check_descriptors(&descriptors)) {
            return Err(err);
        }

        let index = descriptors
            .iter()
            .enumerate()
            .map(|(pos, d)| (d.name, pos))
            .collect();

        Ok(Self { descriptors, index })
    }

    /// Built-in catalog
    pub fn builtin() -> RegistryResult<Self> {
        Self::new(builtin_descriptors())
    }

    /// Parse a TOML catalog
    pub fn from_toml_str(content: &str) -> RegistryResult<Self> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| RegistryError::Catalog(e.to_string()))?;
        Self::new(file.capability)
    }

    /// Load a TOML catalog from disk
    pub fn from_path(path: &Path) -> RegistryResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::Catalog(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Every descriptor, in declaration order
    pub fn all(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// Non-sentinel descriptors, in declaration order
    pub fn loadable(&self) -> impl Iterator<Item = &Descriptor> {
        self.descriptors.iter().filter(|d| !d.is_sentinel())
    }

    /// Look up by wire name. Unknown names are `None`.
    pub fn get(&self, name: &str) -> Option<&Descriptor> {
        CapabilityId::parse(name).and_then(|id| self.get_id(id))
    }

    pub fn get_id(&self, id: CapabilityId) -> Option<&Descriptor> {
        self.index.get(&id).map(|&pos| &self.descriptors[pos])
    }

    pub fn contains(&self, id: CapabilityId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// The portal's built-in catalog
pub fn builtin_descriptors() -> Vec<Descriptor> {
    use CapabilityId as C;
    use Category as K;
    use Role as R;
    use TenantType as T;

    const ACADEMIC: [TenantType; 6] = [
        T::School,
        T::College,
        T::University,
        T::Iti,
        T::MedicalInstitute,
        T::CoachingCenter,
    ];
    const HIGHER_ED: [TenantType; 3] = [T::College, T::University, T::MedicalInstitute];

    fn only_roles(roles: &[Role]) -> Scope<Role> {
        Scope::only(roles.iter().copied())
    }

    fn only_types(types: &[TenantType]) -> Scope<TenantType> {
        Scope::only(types.iter().copied())
    }

    let any: Scope<TenantType> = Scope::Any;

    vec![
        Descriptor::new(C::Overview, K::Home, Scope::Any, Scope::Any, "Overview", "Dashboard home", "home"),
        // Academics
        Descriptor::new(
            C::Timetable,
            K::Academics,
            only_roles(&[R::Student, R::Teacher, R::Parent, R::Admin, R::Principal]),
            only_types(&[T::School, T::College, T::University, T::Iti, T::CoachingCenter]),
            "Timetable",
            "Weekly class and period schedule",
            "calendar-clock",
        )
        .localized("साप्ताहिक समय सारणी"),
        Descriptor::new(
            C::Attendance,
            K::Academics,
            only_roles(&[R::Student, R::Teacher, R::Parent, R::Admin, R::Principal]),
            any.clone(),
            "Attendance Tracker",
            "Daily attendance marking and history",
            "check-square",
        )
        .localized("दैनिक उपस्थिति"),
        Descriptor::new(
            C::Homework,
            K::Academics,
            only_roles(&[R::Student, R::Teacher, R::Parent]),
            only_types(&[T::School, T::CoachingCenter]),
            "Homework Hub",
            "Assignments, submissions and feedback",
            "book-open",
        ),
        Descriptor::new(
            C::LessonPlanner,
            K::Academics,
            only_roles(&[R::Teacher, R::Principal]),
            only_types(&[T::School, T::College, T::Iti]),
            "Lesson Planner",
            "Plan lessons against the syllabus",
            "clipboard-list",
        ),
        Descriptor::new(
            C::CourseCatalog,
            K::Academics,
            only_roles(&[R::Student, R::College, R::Admin]),
            only_types(&HIGHER_ED),
            "Course Catalog",
            "Programs, electives and credit requirements",
            "library",
        ),
        Descriptor::new(
            C::DigitalLibrary,
            K::Academics,
            only_roles(&[R::Student, R::Teacher, R::Staff]),
            any.clone(),
            "Digital Library",
            "E-books, journals and lending",
            "book",
        ),
        Descriptor::new(
            C::LabScheduler,
            K::Academics,
            only_roles(&[R::Teacher, R::Staff, R::Admin]),
            only_types(&[T::College, T::University, T::Iti, T::MedicalInstitute]),
            "Lab Scheduler",
            "Book laboratory slots and equipment",
            "flask",
        ),
        Descriptor::new(
            C::ClinicalRotations,
            K::Academics,
            only_roles(&[R::Student, R::Teacher, R::Director]),
            only_types(&[T::MedicalInstitute]),
            "Clinical Rotations",
            "Ward postings and rotation logs",
            "stethoscope",
        ),
        Descriptor::new(
            C::TradeWorkshop,
            K::Academics,
            only_roles(&[R::Student, R::Teacher]),
            only_types(&[T::Iti]),
            "Trade Workshop Log",
            "Practical hours per trade",
            "wrench",
        ),
        // Examinations
        Descriptor::new(
            C::OnlineExam,
            K::Examinations,
            only_roles(&[R::Student, R::Teacher, R::Admin]),
            any.clone(),
            "Online Exam",
            "Timed tests with automatic grading",
            "file-check",
        )
        .localized("ऑनलाइन परीक्षा"),
        Descriptor::new(
            C::QuestionBank,
            K::Examinations,
            only_roles(&[R::Teacher, R::Admin]),
            any.clone(),
            "Question Bank",
            "Reusable questions tagged by topic",
            "archive",
        ),
        Descriptor::new(
            C::ReportCards,
            K::Examinations,
            only_roles(&[R::Student, R::Parent, R::Teacher, R::Principal]),
            only_types(&[T::School]),
            "Report Cards",
            "Term results and remarks",
            "award",
        ),
        Descriptor::new(
            C::MockTests,
            K::Examinations,
            only_roles(&[R::Student, R::Teacher]),
            only_types(&[T::CoachingCenter]),
            "Mock Test Series",
            "Practice papers with rank lists",
            "target",
        ),
        // Administration
        Descriptor::new(
            C::Admissions,
            K::Administration,
            only_roles(&[R::Admin, R::Staff, R::Principal, R::College]),
            only_types(&ACADEMIC),
            "Admissions Desk",
            "Enquiries, applications and enrolment",
            "user-plus",
        ),
        Descriptor::new(
            C::VisitorLog,
            K::Administration,
            only_roles(&[R::Staff, R::Admin]),
            any.clone(),
            "Visitor Log",
            "Gate entries and visitor passes",
            "id-card",
        ),
        Descriptor::new(
            C::Transport,
            K::Administration,
            only_roles(&[R::Admin, R::Staff, R::Parent]),
            only_types(&[T::School, T::College]),
            "Transport Manager",
            "Bus routes, stops and live tracking",
            "bus",
        ),
        Descriptor::new(
            C::Hostel,
            K::Administration,
            only_roles(&[R::Admin, R::Staff, R::Student]),
            only_types(&HIGHER_ED),
            "Hostel Management",
            "Rooms, allocations and mess",
            "bed",
        ),
        Descriptor::new(
            C::Inventory,
            K::Administration,
            only_roles(&[R::Admin, R::Staff]),
            any.clone(),
            "Inventory & Assets",
            "Stock, purchases and asset register",
            "package",
        ),
        Descriptor::new(
            C::Certificates,
            K::Administration,
            only_roles(&[R::Admin, R::Principal, R::Director]),
            any.clone(),
            "Certificate Issuer",
            "Transfer, bonafide and course certificates",
            "scroll",
        ),
        // Finance
        Descriptor::new(
            C::FeeManagement,
            K::Finance,
            only_roles(&[R::Admin, R::Parent, R::Student, R::Staff]),
            only_types(&ACADEMIC),
            "Fee Management",
            "Invoices, receipts and dues",
            "wallet",
        )
        .localized("फीस प्रबंधन"),
        Descriptor::new(
            C::Payroll,
            K::Finance,
            only_roles(&[R::Admin, R::Director, R::Company]),
            any.clone(),
            "Payroll",
            "Salary runs and payslips",
            "banknote",
        ),
        Descriptor::new(
            C::ExpenseTracker,
            K::Finance,
            only_roles(&[R::Admin, R::Director]),
            any.clone(),
            "Expense Tracker",
            "Budgets and spending approvals",
            "receipt",
        ),
        Descriptor::new(
            C::Scholarships,
            K::Finance,
            only_roles(&[R::Student, R::Admin]),
            only_types(&HIGHER_ED),
            "Scholarships",
            "Schemes, applications and disbursal",
            "gift",
        ),
        // Communication
        Descriptor::new(
            C::NoticeBoard,
            K::Communication,
            Scope::Any,
            any.clone(),
            "Notice Board",
            "Institution-wide announcements",
            "megaphone",
        )
        .localized("सूचना पट"),
        Descriptor::new(
            C::CampusChat,
            K::Communication,
            only_roles(&[R::Student, R::Teacher, R::Parent, R::Staff, R::Admin]),
            any.clone(),
            "Campus Chat",
            "Direct and group messaging",
            "message-circle",
        ),
        Descriptor::new(
            C::Circulars,
            K::Communication,
            only_roles(&[R::Admin, R::Principal, R::Director, R::Teacher]),
            any.clone(),
            "Circular Composer",
            "Draft and publish circulars",
            "file-text",
        ),
        Descriptor::new(
            C::ParentMeetings,
            K::Communication,
            only_roles(&[R::Parent, R::Teacher, R::Principal]),
            only_types(&[T::School]),
            "Parent-Teacher Meetings",
            "Book and record PTM slots",
            "users",
        ),
        Descriptor::new(
            C::BulkMessaging,
            K::Communication,
            only_roles(&[R::Admin, R::Principal]),
            any.clone(),
            "Bulk Messaging",
            "SMS and email broadcasts",
            "send",
        ),
        // Campus life
        Descriptor::new(
            C::Canteen,
            K::CampusLife,
            only_roles(&[R::Student, R::Teacher, R::Staff]),
            any.clone(),
            "Canteen Ordering",
            "Menus, pre-orders and wallet",
            "coffee",
        ),
        Descriptor::new(
            C::EventsCalendar,
            K::CampusLife,
            Scope::Any,
            any.clone(),
            "Events Calendar",
            "Holidays, fests and deadlines",
            "calendar",
        ),
        Descriptor::new(
            C::Clubs,
            K::CampusLife,
            only_roles(&[R::Student, R::Teacher]),
            only_types(&[T::School, T::College, T::University]),
            "Clubs & Societies",
            "Memberships and activities",
            "flag",
        ),
        Descriptor::new(
            C::SportsCenter,
            K::CampusLife,
            only_roles(&[R::Student, R::Teacher, R::Staff]),
            only_types(&[T::School, T::College, T::University]),
            "Sports Center",
            "Facilities, teams and fixtures",
            "trophy",
        ),
        // Human resources
        Descriptor::new(
            C::SmartHrManager,
            K::HumanResources,
            only_roles(&[R::Admin, R::Director, R::Company]),
            any.clone(),
            "Smart HR Manager",
            "Staff records, appraisals and onboarding",
            "briefcase",
        ),
        Descriptor::new(
            C::LeaveManagement,
            K::HumanResources,
            only_roles(&[R::Teacher, R::Staff, R::Admin, R::Principal]),
            any.clone(),
            "Leave Management",
            "Apply for and approve leave",
            "calendar-x",
        ),
        Descriptor::new(
            C::Recruitment,
            K::HumanResources,
            only_roles(&[R::Company, R::Director, R::Admin]),
            only_types(&[T::Company, T::College, T::University]),
            "Recruitment Pipeline",
            "Openings, candidates and interviews",
            "user-search",
        ),
        // Careers
        Descriptor::new(
            C::PlacementCell,
            K::Careers,
            only_roles(&[R::Student, R::College, R::Company, R::Admin]),
            only_types(&[T::College, T::University, T::Iti]),
            "Placement Cell",
            "Drives, eligibility and offers",
            "building",
        ),
        Descriptor::new(
            C::Internships,
            K::Careers,
            only_roles(&[R::Student, R::Company, R::College]),
            only_types(&[T::College, T::University, T::Iti, T::MedicalInstitute]),
            "Internship Board",
            "Listings and applications",
            "compass",
        ),
        Descriptor::new(
            C::AlumniNetwork,
            K::Careers,
            only_roles(&[R::Student, R::College, R::Director]),
            only_types(&[T::College, T::University]),
            "Alumni Network",
            "Directory and mentorship",
            "network",
        ),
        // AI tools
        Descriptor::new(
            C::AiTutor,
            K::AiTools,
            only_roles(&[R::Student, R::Teacher]),
            only_types(&[T::School, T::College, T::University, T::Iti, T::CoachingCenter]),
            "AI Tutor",
            "Step-by-step help with any subject",
            "sparkles",
        )
        .localized("एआई ट्यूटर"),
        Descriptor::new(
            C::AiLessonGenerator,
            K::AiTools,
            only_roles(&[R::Teacher]),
            any.clone(),
            "AI Lesson Generator",
            "Draft lesson plans and worksheets",
            "wand",
        ),
        // Analytics
        Descriptor::new(
            C::PerformanceInsights,
            K::Analytics,
            only_roles(&[R::Teacher, R::Principal, R::Director, R::Parent]),
            any.clone(),
            "Performance Insights",
            "Trends across tests and attendance",
            "trending-up",
        ),
        Descriptor::new(
            C::InstitutionAnalytics,
            K::Analytics,
            only_roles(&[R::Director, R::Principal, R::Admin]),
            any.clone(),
            "Institution Analytics",
            "Enrolment, revenue and staffing at a glance",
            "bar-chart",
        ),
        Descriptor::new(
            C::ComplianceReports,
            K::Analytics,
            only_roles(&[R::Director, R::Admin]),
            only_types(&[T::MedicalInstitute, T::Iti, T::College, T::University]),
            "Compliance Reports",
            "Regulator filings and audit trails",
            "shield-check",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let set = DescriptorSet::builtin().unwrap();
        assert_eq!(set.len(), CapabilityId::ALL.len());
        for id in CapabilityId::ALL {
            assert!(set.contains(*id), "{id} missing from builtin catalog");
        }
    }

    #[test]
    fn test_get_unknown_is_none() {
        let set = DescriptorSet::builtin().unwrap();
        assert!(set.get("no_such_module").is_none());
        assert_eq!(set.get("ai_tutor").unwrap().display.title, "AI Tutor");
    }

    #[test]
    fn test_declaration_order_preserved() {
        let set = DescriptorSet::builtin().unwrap();
        let names: Vec<_> = set.all().iter().map(|d| d.name).collect();
        let declared: Vec<_> = builtin_descriptors().iter().map(|d| d.name).collect();
        assert_eq!(names, declared);
        assert_eq!(names[0], CapabilityId::Overview);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut descriptors = builtin_descriptors();
        descriptors.push(descriptors[1].clone());

        let err = DescriptorSet::new(descriptors).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName(CapabilityId::Timetable));
    }

    #[test]
    fn test_empty_roles_rejected() {
        let descriptors = vec![Descriptor::new(
            CapabilityId::Canteen,
            Category::CampusLife,
            Scope::Only(vec![]),
            Scope::Any,
            "Canteen",
            "Food",
            "coffee",
        )];

        let err = DescriptorSet::new(descriptors).unwrap_err();
        assert_eq!(err, RegistryError::EmptyRoles(CapabilityId::Canteen));
    }

    #[test]
    fn test_scope_admits() {
        let scope = Scope::only([Role::Student, Role::Teacher]);
        assert!(scope.admits(&Role::Student));
        assert!(!scope.admits(&Role::Parent));
        assert!(Scope::<Role>::Any.admits(&Role::Parent));
        assert!(Scope::<Role>::Only(vec![]).is_empty());
        assert!(!Scope::<Role>::Any.is_empty());
    }

    #[test]
    fn test_catalog_from_toml() {
        let content = r#"
            [[capability]]
            name = "canteen"
            category = "campus_life"
            allowed_roles = ["student", "staff"]
            [capability.display]
            title = "Canteen"
            short_description = "Order lunch"
            icon = "coffee"

            [[capability]]
            name = "notice_board"
            category = "communication"
            allowed_roles = "any"
            allowed_tenant_types = ["school"]
            [capability.display]
            title = "Notices"
            short_description = "Announcements"
            localized_description = "सूचना"
            icon = "megaphone"
        "#;

        let set = DescriptorSet::from_toml_str(content).unwrap();
        assert_eq!(set.len(), 2);

        let canteen = set.get_id(CapabilityId::Canteen).unwrap();
        assert_eq!(canteen.allowed_roles, Scope::only([Role::Student, Role::Staff]));
        assert_eq!(canteen.allowed_tenant_types, Scope::Any);

        let notices = set.get_id(CapabilityId::NoticeBoard).unwrap();
        assert_eq!(notices.allowed_roles, Scope::Any);
        assert_eq!(notices.allowed_tenant_types, Scope::only([TenantType::School]));
        assert_eq!(notices.display.localized_description.as_deref(), Some("सूचना"));
    }

    #[test]
    fn test_catalog_from_toml_misspelled_scopes() {
        let content = r#"
            [[capability]]
            name = "canteen"
            category = "campus_life"
            allowed_roles = ["studnet"]
            [capability.display]
            title = "Canteen"
            short_description = "Order lunch"
            icon = "coffee"

            [[capability]]
            name = "hostel"
            category = "administration"
            allowed_roles = "any"
            allowed_tenant_types = ["collage"]
            [capability.display]
            title = "Hostel"
            short_description = "Rooms"
            icon = "bed"
        "#;

        match DescriptorSet::from_toml_str(content).unwrap_err() {
            RegistryError::Multiple(defects) => {
                assert_eq!(
                    defects,
                    vec![
                        RegistryError::UnrecognisedRole(CapabilityId::Canteen),
                        RegistryError::UnrecognisedTenantType(CapabilityId::Hostel),
                    ]
                );
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_catalog_from_toml_unknown_name() {
        let content = r#"
            [[capability]]
            name = "time_machine"
            category = "academics"
            allowed_roles = "any"
            [capability.display]
            title = "Time Machine"
            short_description = "?"
            icon = "clock"
        "#;

        assert!(matches!(
            DescriptorSet::from_toml_str(content),
            Err(RegistryError::Catalog(_))
        ));
    }
}
