use bevy::prelude::*;

use crate::engine::assets::portfolio_data::PortfolioData;

/// Scene lifecycle. `Running` is the mounted scene; leaving it tears the
/// scene down and nothing scene-related runs in `Unmounted`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
    Unmounted,
}

/// Mount the scene as soon as a portfolio is available, whichever source
/// provided it.
pub fn transition_to_running(
    portfolio: Option<Res<PortfolioData>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if portfolio.is_some() {
        info!("→ Portfolio available, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}
