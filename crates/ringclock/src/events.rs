use goalbook::Goal;

#[derive(Debug, Clone)]
pub enum AppEvent {
    GoalsLoaded(Vec<Goal>),
    ConfigReload,
}
