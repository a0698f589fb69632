//! Implementation Map
//!
//! Binds each capability to a loader that produces its component on demand.

use crate::capability::CapabilityId;
use crate::dispatcher::MountProps;
use crate::error::{LoadError, MountError, RegistryError, RegistryResult};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Rendered output of a mounted component
pub type View = serde_json::Value;

/// A feature screen.
///
/// Components only ever receive [`MountProps`]; nothing else from the shell
/// reaches them.
pub trait Component: Send + Sync {
    /// Initial render
    fn mount(&self, props: MountProps) -> Result<View, MountError>;
}

/// Shared handle to a loaded component
pub type ComponentRef = Arc<dyn Component>;

/// Fetches a component implementation
#[async_trait]
pub trait ComponentLoader: Send + Sync {
    async fn load(&self) -> Result<ComponentRef, LoadError>;
}

/// Loader for a component that is already in memory
pub struct StaticLoader(ComponentRef);

impl StaticLoader {
    pub fn new(component: impl Component + 'static) -> Self {
        Self(Arc::new(component))
    }
}

#[async_trait]
impl ComponentLoader for StaticLoader {
    async fn load(&self) -> Result<ComponentRef, LoadError> {
        Ok(self.0.clone())
    }
}

/// Loader backed by an async closure
pub struct FnLoader<F>(F);

impl<F, Fut> FnLoader<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<ComponentRef, LoadError>> + Send,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F, Fut> ComponentLoader for FnLoader<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<ComponentRef, LoadError>> + Send,
{
    async fn load(&self) -> Result<ComponentRef, LoadError> {
        (self.0)().await
    }
}

/// Client-side screen bundle.
///
/// The shell hands the browser the bundle to fetch together with the
/// signed-in user; the screen itself lives in the frontend.
#[derive(Debug, Clone)]
pub struct RemoteScreen {
    pub capability: CapabilityId,
    pub bundle: &'static str,
}

impl Component for RemoteScreen {
    fn mount(&self, props: MountProps) -> Result<View, MountError> {
        Ok(json!({
            "capability": self.capability,
            "bundle": self.bundle,
            "user": props.user,
        }))
    }
}

/// Frontend bundle for each built-in capability.
///
/// Exhaustive on purpose: a new [`CapabilityId`] variant does not compile
/// until it is bound here.
pub fn builtin_bundle(id: CapabilityId) -> Option<&'static str> {
    use CapabilityId::*;

    let bundle = match id {
        Overview => return None,

        Timetable => "academics/timetable",
        Attendance => "academics/attendance",
        Homework => "academics/homework",
        LessonPlanner => "academics/lesson-planner",
        CourseCatalog => "academics/course-catalog",
        DigitalLibrary => "academics/library",
        LabScheduler => "academics/lab-scheduler",
        ClinicalRotations => "medical/rotations",
        TradeWorkshop => "iti/workshop",

        OnlineExam => "exams/online-exam",
        QuestionBank => "exams/question-bank",
        ReportCards => "exams/report-cards",
        MockTests => "coaching/mock-tests",

        Admissions => "admin/admissions",
        VisitorLog => "admin/visitors",
        Transport => "admin/transport",
        Hostel => "admin/hostel",
        Inventory => "admin/inventory",
        Certificates => "admin/certificates",

        FeeManagement => "finance/fees",
        Payroll => "finance/payroll",
        ExpenseTracker => "finance/expenses",
        Scholarships => "finance/scholarships",

        NoticeBoard => "comms/notices",
        CampusChat => "comms/chat",
        Circulars => "comms/circulars",
        ParentMeetings => "comms/ptm",
        BulkMessaging => "comms/broadcast",

        Canteen => "campus/canteen",
        EventsCalendar => "campus/calendar",
        Clubs => "campus/clubs",
        SportsCenter => "campus/sports",

        SmartHrManager => "hr/smart-hr",
        LeaveManagement => "hr/leave",
        Recruitment => "hr/recruitment",

        PlacementCell => "careers/placements",
        Internships => "careers/internships",
        AlumniNetwork => "careers/alumni",

        AiTutor => "ai/tutor",
        AiLessonGenerator => "ai/lesson-generator",

        PerformanceInsights => "analytics/performance",
        InstitutionAnalytics => "analytics/institution",
        ComplianceReports => "analytics/compliance",
    };

    Some(bundle)
}

/// Capability name to loader
pub struct ImplementationMap {
    loaders: HashMap<CapabilityId, Arc<dyn ComponentLoader>>,
}

impl ImplementationMap {
    pub fn builder() -> ImplementationMapBuilder {
        ImplementationMapBuilder::default()
    }

    /// Bind every built-in capability to its frontend bundle
    pub fn builtin() -> Self {
        Self::builtin_for(CapabilityId::ALL.iter().copied())
    }

    /// Built-in bindings for just the listed capabilities, so a reduced
    /// catalog gets a map with no orphan loaders
    pub fn builtin_for(ids: impl IntoIterator<Item = CapabilityId>) -> Self {
        let loaders = ids
            .into_iter()
            .filter_map(|id| {
                let bundle = builtin_bundle(id)?;
                let loader: Arc<dyn ComponentLoader> =
                    Arc::new(StaticLoader::new(RemoteScreen { capability: id, bundle }));
                Some((id, loader))
            })
            .collect();

        Self { loaders }
    }

    /// Is there a loader for this wire name?
    pub fn has(&self, name: &str) -> bool {
        CapabilityId::parse(name).is_some_and(|id| self.contains(id))
    }

    pub fn contains(&self, id: CapabilityId) -> bool {
        self.loaders.contains_key(&id)
    }

    pub fn get(&self, id: CapabilityId) -> Option<Arc<dyn ComponentLoader>> {
        self.loaders.get(&id).cloned()
    }

    /// Bound names, sorted
    pub fn ids(&self) -> Vec<CapabilityId> {
        let mut ids: Vec<_> = self.loaders.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl fmt::Debug for ImplementationMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImplementationMap")
            .field("bound", &self.ids())
            .finish()
    }
}

/// Builder that rejects sentinel and duplicate bindings
#[derive(Default)]
pub struct ImplementationMapBuilder {
    loaders: HashMap<CapabilityId, Arc<dyn ComponentLoader>>,
    defects: Vec<RegistryError>,
}

impl ImplementationMapBuilder {
    pub fn bind(self, id: CapabilityId, loader: impl ComponentLoader + 'static) -> Self {
        self.bind_arc(id, Arc::new(loader))
    }

    pub fn bind_arc(mut self, id: CapabilityId, loader: Arc<dyn ComponentLoader>) -> Self {
        if id.is_sentinel() {
            self.defects.push(RegistryError::SentinelBound(id));
        } else if self.loaders.insert(id, loader).is_some() {
            self.defects.push(RegistryError::DuplicateLoader(id));
        }
        self
    }

    pub fn build(self) -> RegistryResult<ImplementationMap> {
        match RegistryError::from_defects(self.defects) {
            Some(err) => Err(err),
            None => Ok(ImplementationMap { loaders: self.loaders }),
        }
    }
}
