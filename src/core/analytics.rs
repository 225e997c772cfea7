//! Analytics aggregation service
//!
//! Computes the read-only dashboard numbers from whatever data is reachable:
//! the domain store for courses, projects, and events, and the tracked-event
//! buffer for visitors and users. The service is explicitly constructed with
//! its data sources and handed around by the composition root; there is no
//! hidden global instance.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use serde_json::Value;

use crate::core::models::{CourseStatus, EventStatus, ProjectStatus};
use crate::core::store::Store;

/// Window used for the online-user estimate
const ONLINE_WINDOW_MINUTES: i64 = 5;

/// Kind of tracked event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedKind {
    /// A public or portal page was viewed
    PageView,
    /// A user signed in
    Login,
    /// Any other interaction worth counting
    Interaction,
}

/// One tracked event in the ring buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackedEvent {
    /// Event kind
    pub kind: TrackedKind,
    /// Free-form payload (page views carry a `page` key)
    pub data: Value,
    /// User who triggered the event, when known
    pub user_id: Option<String>,
    /// When the event was recorded
    pub occurred_at: DateTime<Utc>,
}

/// User-level aggregates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserStats {
    /// Distinct user ids observed in the tracked-event buffer, the only
    /// user signal available to this layer
    pub known_users: u64,
}

/// Course-catalogue aggregates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CourseStats {
    /// All courses
    pub total: u64,
    /// Courses with `CourseStatus::Active`
    pub active: u64,
    /// Sum of enrolled students across courses
    pub total_enrolled: u64,
    /// Mean rating across courses (0 when the catalogue is empty)
    pub average_rating: f32,
}

/// Project aggregates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ProjectStats {
    /// All projects
    pub total: u64,
    /// Projects with `ProjectStatus::Active`
    pub active: u64,
    /// Mean progress across projects, averaged exactly as stored
    /// (out-of-range values are not clamped)
    pub average_progress: f32,
}

/// Event aggregates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventStats {
    /// All events
    pub total: u64,
    /// Events with `EventStatus::Upcoming`
    pub upcoming: u64,
}

/// Visitor aggregates, fed by `TrackedKind::PageView` events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisitorStats {
    /// Total page views tracked this session
    pub page_views: u64,
    /// Distinct user ids seen on page views
    pub unique_visitors: u64,
    /// Most viewed pages, descending
    pub top_pages: Vec<(String, u64)>,
}

/// "Realtime" estimates, refreshed on a faster tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RealtimeStats {
    /// Estimated users online now. Partly randomized: nothing in this
    /// layer can actually measure presence, so the figure is an estimate.
    pub online_users: u64,
    /// Projects currently active
    pub active_projects: u64,
}

/// The full dashboard snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    /// User aggregates
    pub users: UserStats,
    /// Course aggregates
    pub courses: CourseStats,
    /// Project aggregates
    pub projects: ProjectStats,
    /// Event aggregates
    pub events: EventStats,
    /// Visitor aggregates
    pub visitors: VisitorStats,
    /// Realtime estimates
    pub realtime: RealtimeStats,
    /// When this snapshot was computed
    pub generated_at: Option<DateTime<Utc>>,
}

type Callback = dyn Fn(&DashboardStats) + Send + Sync;

struct AnalyticsState {
    events: VecDeque<TrackedEvent>,
    /// Running visitor counters; they outlive ring-buffer eviction
    page_views: u64,
    visitor_ids: HashSet<String>,
    page_counts: HashMap<String, u64>,
    stats: DashboardStats,
    subscribers: HashMap<u64, Arc<Callback>>,
    next_subscriber: u64,
}

/// Push-based aggregation over the domain store and the tracked events
pub struct AnalyticsService {
    store: Store,
    max_events: usize,
    state: Arc<Mutex<AnalyticsState>>,
}

/// Registration handle returned by `AnalyticsService::subscribe`
///
/// Dropping the handle (or calling `unsubscribe`) deregisters the callback.
pub struct Subscription {
    id: u64,
    state: Weak<Mutex<AnalyticsState>>,
}

impl Subscription {
    /// Deregister the callback now
    pub fn unsubscribe(self) {
        // Drop does the work
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .subscribers
                .remove(&self.id);
        }
    }
}

impl AnalyticsService {
    /// Create a service sampling the given store
    ///
    /// # Arguments
    /// * `store` - Domain collections to aggregate
    /// * `max_events` - Capacity of the tracked-event ring buffer
    #[must_use]
    pub fn new(store: Store, max_events: usize) -> Self {
        Self {
            store,
            max_events,
            state: Arc::new(Mutex::new(AnalyticsState {
                events: VecDeque::new(),
                page_views: 0,
                visitor_ids: HashSet::new(),
                page_counts: HashMap::new(),
                stats: DashboardStats::default(),
                subscribers: HashMap::new(),
                next_subscriber: 0,
            })),
        }
    }

    /// Record one event
    ///
    /// The buffer is capped at `max_events`; the oldest entry is dropped
    /// past that. Page views additionally bump the visitor counters without
    /// waiting for the next full recompute.
    pub fn track_event(&self, kind: TrackedKind, data: Value, user_id: Option<String>) {
        let event = TrackedEvent {
            kind,
            data,
            user_id,
            occurred_at: Utc::now(),
        };

        let mut state = self.lock();
        if kind == TrackedKind::PageView {
            state.page_views += 1;
            if let Some(user) = &event.user_id {
                state.visitor_ids.insert(user.clone());
            }
            if let Some(page) = event.data.get("page").and_then(Value::as_str) {
                *state.page_counts.entry(page.to_string()).or_insert(0) += 1;
            }
            let visitors = Self::visitor_snapshot(&state);
            state.stats.visitors = visitors;
        }

        state.events.push_back(event);
        while state.events.len() > self.max_events {
            state.events.pop_front();
        }
    }

    /// Tracked events currently retained, oldest first
    #[must_use]
    pub fn recent_events(&self) -> Vec<TrackedEvent> {
        self.lock().events.iter().cloned().collect()
    }

    /// Register a push listener called after every recompute
    #[must_use]
    pub fn subscribe(&self, callback: impl Fn(&DashboardStats) + Send + Sync + 'static) -> Subscription {
        let mut state = self.lock();
        let id = state.next_subscriber;
        state.next_subscriber += 1;
        state.subscribers.insert(id, Arc::new(callback));
        Subscription {
            id,
            state: Arc::downgrade(&self.state),
        }
    }

    /// Last computed snapshot
    #[must_use]
    pub fn stats(&self) -> DashboardStats {
        self.lock().stats.clone()
    }

    /// Synchronous full recompute; pushes the snapshot to subscribers and
    /// returns it
    pub fn recalculate_all_stats(&self) -> DashboardStats {
        let courses = self.course_stats();
        let projects = self.project_stats();
        let events = self.event_stats();

        let mut guard = self.lock();
        let state = &mut *guard;
        state.stats.courses = courses;
        state.stats.projects = projects;
        state.stats.events = events;
        state.stats.users = UserStats {
            known_users: Self::known_users(&state.events),
        };
        let visitors = Self::visitor_snapshot(state);
        state.stats.visitors = visitors;
        state.stats.realtime = Self::realtime_snapshot(&state.events, projects.active);
        state.stats.generated_at = Some(Utc::now());

        let stats = state.stats.clone();
        let subscribers: Vec<Arc<Callback>> = state.subscribers.values().cloned().collect();
        drop(guard);

        crate::debug!(
            "Dashboard recomputed: {} courses, {} projects, {} page views",
            stats.courses.total,
            stats.projects.total,
            stats.visitors.page_views
        );
        for subscriber in subscribers {
            subscriber(&stats);
        }
        stats
    }

    /// Refresh only the realtime estimates; pushes the snapshot to
    /// subscribers and returns it
    pub fn refresh_realtime(&self) -> DashboardStats {
        let active = self.project_stats().active;

        let mut guard = self.lock();
        let state = &mut *guard;
        state.stats.realtime = Self::realtime_snapshot(&state.events, active);

        let stats = state.stats.clone();
        let subscribers: Vec<Arc<Callback>> = state.subscribers.values().cloned().collect();
        drop(guard);

        for subscriber in subscribers {
            subscriber(&stats);
        }
        stats
    }

    /// Full recompute on a fixed cadence. Spawn this on the runtime and
    /// abort the task to stop it.
    pub async fn refresh_loop(&self, interval: Duration) {
        loop {
            tokio::time::sleep(interval).await;
            self.recalculate_all_stats();
        }
    }

    /// Realtime refresh on a faster cadence. Spawn and abort like
    /// `refresh_loop`.
    pub async fn realtime_loop(&self, interval: Duration) {
        loop {
            tokio::time::sleep(interval).await;
            self.refresh_realtime();
        }
    }

    fn course_stats(&self) -> CourseStats {
        let courses = self.store.courses.list();
        let total = courses.len() as u64;
        let active = courses
            .iter()
            .filter(|c| c.status == CourseStatus::Active)
            .count() as u64;
        let total_enrolled = courses.iter().map(|c| u64::from(c.enrolled)).sum();
        let average_rating = if courses.is_empty() {
            0.0
        } else {
            courses.iter().map(|c| c.rating).sum::<f32>() / courses.len() as f32
        };

        CourseStats {
            total,
            active,
            total_enrolled,
            average_rating,
        }
    }

    fn project_stats(&self) -> ProjectStats {
        let projects = self.store.projects.list();
        let total = projects.len() as u64;
        let active = projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Active)
            .count() as u64;
        let average_progress = if projects.is_empty() {
            0.0
        } else {
            projects.iter().map(|p| p.progress as f32).sum::<f32>() / projects.len() as f32
        };

        ProjectStats {
            total,
            active,
            average_progress,
        }
    }

    fn event_stats(&self) -> EventStats {
        let events = self.store.events.list();
        EventStats {
            total: events.len() as u64,
            upcoming: events
                .iter()
                .filter(|e| e.status == EventStatus::Upcoming)
                .count() as u64,
        }
    }

    fn known_users(events: &VecDeque<TrackedEvent>) -> u64 {
        events
            .iter()
            .filter_map(|e| e.user_id.as_deref())
            .collect::<HashSet<_>>()
            .len() as u64
    }

    fn visitor_snapshot(state: &AnalyticsState) -> VisitorStats {
        let mut top_pages: Vec<(String, u64)> = state
            .page_counts
            .iter()
            .map(|(page, count)| (page.clone(), *count))
            .collect();
        top_pages.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_pages.truncate(5);

        VisitorStats {
            page_views: state.page_views,
            unique_visitors: state.visitor_ids.len() as u64,
            top_pages,
        }
    }

    fn realtime_snapshot(events: &VecDeque<TrackedEvent>, active_projects: u64) -> RealtimeStats {
        let cutoff = Utc::now() - chrono::Duration::minutes(ONLINE_WINDOW_MINUTES);
        let recent_users = events
            .iter()
            .filter(|e| e.occurred_at >= cutoff)
            .filter_map(|e| e.user_id.as_deref())
            .collect::<HashSet<_>>()
            .len() as u64;

        // Estimated, not measured: anonymous visitors leave no user id, so
        // a small randomized allowance stands in for them.
        let anonymous_allowance = rand::thread_rng().gen_range(0..=3);

        RealtimeStats {
            online_users: recent_users + anonymous_allowance,
            active_projects,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AnalyticsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn page_view(page: &str) -> Value {
        json!({ "page": page })
    }

    #[test]
    fn test_page_views_accumulate() {
        let svc = AnalyticsService::new(Store::new(), 100);

        for _ in 0..5 {
            svc.track_event(TrackedKind::PageView, page_view("/"), None);
        }
        let stats = svc.recalculate_all_stats();

        assert!(stats.visitors.page_views >= 5);
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let svc = AnalyticsService::new(Store::new(), 3);

        for i in 0..5 {
            svc.track_event(
                TrackedKind::Interaction,
                Value::Null,
                Some(format!("u-{i}")),
            );
        }

        let retained = svc.recent_events();
        assert_eq!(retained.len(), 3);
        assert_eq!(retained[0].user_id.as_deref(), Some("u-2"));
    }

    #[test]
    fn test_page_view_counter_survives_eviction() {
        let svc = AnalyticsService::new(Store::new(), 2);

        for _ in 0..10 {
            svc.track_event(TrackedKind::PageView, page_view("/"), None);
        }

        assert_eq!(svc.stats().visitors.page_views, 10);
    }

    #[test]
    fn test_store_aggregates() {
        let store = Store::with_sample_data();
        let svc = AnalyticsService::new(store.clone(), 100);

        let stats = svc.recalculate_all_stats();

        assert_eq!(stats.courses.total, store.courses.len() as u64);
        assert!(stats.courses.active >= 1);
        assert!(stats.courses.total_enrolled > 0);
        assert_eq!(stats.projects.total, store.projects.len() as u64);
        assert!(stats.projects.average_progress > 0.0);
        assert!(stats.events.upcoming >= 1);
        assert!(stats.generated_at.is_some());
    }

    #[test]
    fn test_unvalidated_progress_flows_into_average() {
        let store = Store::new();
        let mut p = crate::core::models::Project::new("p-1".to_string(), "X".to_string());
        p.progress = 150;
        store.projects.create(p);

        let svc = AnalyticsService::new(store, 100);
        let stats = svc.recalculate_all_stats();

        assert!((stats.projects.average_progress - 150.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let svc = AnalyticsService::new(Store::new(), 100);
        let calls = Arc::new(AtomicUsize::new(0));

        let seen = Arc::clone(&calls);
        let sub = svc.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        svc.recalculate_all_stats();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        sub.unsubscribe();
        svc.recalculate_all_stats();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unique_visitors() {
        let svc = AnalyticsService::new(Store::new(), 100);

        svc.track_event(TrackedKind::PageView, page_view("/"), Some("u-1".to_string()));
        svc.track_event(TrackedKind::PageView, page_view("/cours"), Some("u-1".to_string()));
        svc.track_event(TrackedKind::PageView, page_view("/"), Some("u-2".to_string()));

        let stats = svc.recalculate_all_stats();
        assert_eq!(stats.visitors.unique_visitors, 2);
        assert_eq!(stats.visitors.top_pages[0], ("/".to_string(), 2));
    }

    #[test]
    fn test_realtime_counts_active_projects() {
        let store = Store::with_sample_data();
        let svc = AnalyticsService::new(store, 100);

        let stats = svc.refresh_realtime();
        assert_eq!(stats.realtime.active_projects, 1);
    }
}
