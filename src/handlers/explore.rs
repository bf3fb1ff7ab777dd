use url::Url;

use crate::config::TrackerConfig;
use crate::engine::activity::ActivityKind;
use crate::engine::dispatcher::PageRouter;
use crate::engine::state::TrackerState;
use crate::engine::view::ViewState;
use crate::error::Result;
use crate::extract::explore::parse_explore_results;
use crate::extract::page::parse_page_title;
use crate::handlers::apply_activity;
use crate::registry::ActivityType;

pub fn register(pages: &mut PageRouter, config: &TrackerConfig) -> Result<()> {
    pages.register(&config.page_url("worker.php?go=explore&id=*"), visit_explore_results)?;
    pages.register(&config.page_url("worker.php?go=drinklm&id=*"), visit_explore_results)?;
    pages.register(&config.page_url("area.php?*"), visit_area)?;
    Ok(())
}

pub fn visit_explore_results(state: &mut TrackerState, content: &str, url: &Url) -> Result<()> {
    let result = parse_explore_results(content, url)?;
    let kind = if result.lemonade {
        ActivityKind::Lemonade
    } else {
        ActivityKind::Explore
    };
    apply_activity(state, ActivityType::Explore, kind, result)
}

pub fn visit_area(state: &mut TrackerState, content: &str, url: &Url) -> Result<()> {
    let title = parse_page_title(content, url)?;
    if let Some(id) = title.id {
        state.locations.learn_name(ActivityType::Explore, id, &title.name);
    }
    state.enter_view(ViewState::location(ActivityType::Explore, title.name));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemCatalog;
    use crate::error::TrackerError;
    use crate::registry::{Location, LocationRegistry, PetRegistry};
    use std::sync::Arc;

    fn state() -> TrackerState {
        let forest = Location::new(ActivityType::Explore, 7, "Forest")
            .with_items(["Wood", "Mushroom", "Antler", "Straw"]);
        TrackerState::new(
            &TrackerConfig::default(),
            Arc::new(ItemCatalog::builtin().unwrap()),
            LocationRegistry::from_locations(vec![forest]),
            PetRegistry::new(),
        )
    }

    fn explore_url(id: u32) -> Url {
        Url::parse(&format!("https://farmrpg.com/worker.php?go=explore&id={}", id)).unwrap()
    }

    #[test]
    fn drops_are_resolved_and_counted() {
        let mut state = state();
        let page = "You continued and used <strong>3</strong> stamina<br/>\
                    <img src='/img/items/6143.PNG' style='width:24px;'>\
                    <img src='/img/items/mushroom.png' style='width:24px;'>\
                    <img src='/img/items/6143.PNG' style='width:24px;'>\
                    <img src='/img/items/not-in-catalog.png' style='width:24px;'>";
        visit_explore_results(&mut state, page, &explore_url(7)).unwrap();

        assert_eq!(state.inventory.quantity("Wood"), 2);
        assert_eq!(state.inventory.quantity("Mushroom"), 1);
        assert_eq!(state.inventory.quantity("Mushroom Spores"), 0);

        let entry = state.activity.last().unwrap();
        assert_eq!(entry.kind, ActivityKind::Explore);
        assert_eq!(entry.location, "Forest");
        assert_eq!(entry.stamina, Some(3));
        assert_eq!(entry.items.len(), 3);
    }

    #[test]
    fn overflow_caps_at_max() {
        let mut state = state();
        let page = "You continued and used <strong>2</strong> stamina<br/>\
                    <img src='/img/items/5908.png' style='filter: grayscale(100%);'>";
        visit_explore_results(&mut state, page, &explore_url(7)).unwrap();
        assert_eq!(state.inventory.quantity("Straw"), state.inventory.max());
    }

    #[test]
    fn unknown_location_leaves_state_untouched() {
        let mut state = state();
        let page = "<strong>1</strong><img src='/img/items/6143.PNG'>";
        let err = visit_explore_results(&mut state, page, &explore_url(99)).unwrap_err();
        assert!(matches!(err, TrackerError::UnknownLocation { id: 99, .. }));
        assert!(state.inventory.is_empty());
        assert!(state.activity.is_empty());
    }

    #[test]
    fn lemonade_is_logged_as_lemonade() {
        let mut state = state();
        let page = "Lemonade helped you find:<br/><strong><img src='/img/items/6143.PNG'></strong>";
        let url = Url::parse("https://farmrpg.com/worker.php?go=drinklm&id=7").unwrap();
        visit_explore_results(&mut state, page, &url).unwrap();
        let entry = state.activity.last().unwrap();
        assert_eq!(entry.kind, ActivityKind::Lemonade);
        assert_eq!(entry.stamina, None);
        assert_eq!(state.inventory.quantity("Wood"), 1);
    }

    #[test]
    fn area_visit_sets_view_and_learns_name() {
        let mut state = state();
        let url = Url::parse("https://farmrpg.com/area.php?id=8").unwrap();
        visit_area(&mut state, "<div class='center sliding'>Small Cave</div>", &url).unwrap();
        assert_eq!(state.view(), &ViewState::location(ActivityType::Explore, "Small Cave"));
        assert!(state.locations.get_by_id(ActivityType::Explore, 8).is_some());
    }

    #[test]
    fn failed_area_visit_keeps_previous_view() {
        let mut state = state();
        state.enter_view(ViewState::Farm);
        let url = Url::parse("https://farmrpg.com/area.php?id=8").unwrap();
        assert!(visit_area(&mut state, "<p>oops</p>", &url).is_err());
        assert_eq!(state.view(), &ViewState::Farm);
    }
}
