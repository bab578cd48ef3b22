use shared::{Place, RouteResult};

/// Place list shown under the map. Owns the route on display.
#[derive(Debug, Default)]
pub struct RoutePanel {
    route: Option<RouteResult>,
    active: Option<usize>,
    collapsed: bool,
}

impl RoutePanel {
    pub fn show(&mut self, route: RouteResult) {
        self.route = Some(route);
        self.active = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn places(&self) -> &[Place] {
        self.route
            .as_ref()
            .map(|r| r.route.as_slice())
            .unwrap_or(&[])
    }

    /// Makes card `index` the only active one. Out-of-range indices leave
    /// the selection unchanged and return `None`.
    pub fn select(&mut self, index: usize) -> Option<&Place> {
        let route = self.route.as_ref()?;
        let place = route.route.get(index)?;
        self.active = Some(index);
        Some(place)
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn distance_label(&self) -> Option<String> {
        self.route
            .as_ref()
            .map(|r| format!("{} km", r.total_distance_km))
    }

    pub fn time_label(&self) -> Option<String> {
        self.route
            .as_ref()
            .map(|r| format!("{} h", r.estimated_time_hours))
    }
}
