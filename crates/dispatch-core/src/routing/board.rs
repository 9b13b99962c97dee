use crate::model::Job;
use crate::routing::optimize::{optimize_route, OptimizedRoute};
use crate::routing::{Geocoder, RouteProvider};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// A route as displayed for a rep.
#[derive(Debug, Clone)]
pub struct Published {
    /// Board-wide publish counter at the time this route was stored.
    pub revision: u64,
    pub route: Arc<OptimizedRoute>,
}

/// Displayed route per rep. Runs may overlap; whichever finishes last is
/// what the rep sees. In-flight runs are never cancelled.
#[derive(Debug, Default)]
pub struct RouteBoard {
    state: Mutex<BoardState>,
}

#[derive(Debug, Default)]
struct BoardState {
    routes: HashMap<String, Published>,
    /// Bumped under the lock so stored revisions only ever increase.
    revision: u64,
}

impl RouteBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a completed route for `rep_id`, replacing whatever was there.
    pub fn publish(&self, rep_id: &str, route: OptimizedRoute) -> Published {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.revision += 1;
        let revision = state.revision;
        let published = Published {
            revision,
            route: Arc::new(route),
        };
        state.routes.insert(rep_id.to_string(), published.clone());
        debug!(rep = rep_id, revision, "published route");
        published
    }

    /// Route currently displayed for `rep_id`.
    pub fn current(&self, rep_id: &str) -> Option<Published> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.routes.get(rep_id).cloned()
    }

    /// Optimize and publish in one step.
    pub async fn optimize<G, R>(
        &self,
        rep_id: &str,
        jobs: Vec<Job>,
        geocoder: &G,
        router: &R,
    ) -> Published
    where
        G: Geocoder,
        R: RouteProvider,
    {
        let route = optimize_route(jobs, geocoder, router).await;
        self.publish(rep_id, route)
    }
}
