use url::Url;

use crate::config::TrackerConfig;
use crate::engine::activity::ActivityKind;
use crate::engine::dispatcher::PageRouter;
use crate::engine::state::{Outbound, TrackerState};
use crate::engine::view::ViewState;
use crate::error::Result;
use crate::extract::fishing::parse_net_results;
use crate::extract::page::parse_page_title;
use crate::handlers::apply_activity;
use crate::registry::ActivityType;

pub fn register(pages: &mut PageRouter, config: &TrackerConfig) -> Result<()> {
    pages.register(&config.page_url("worker.php?go=castnet&id=*"), visit_net_results)?;
    pages.register(&config.page_url("fishing.php?*"), visit_fishing)?;

    // Selling fish changes quantities the page does not report; ask the
    // transport for a fresh inventory instead.
    let inventory_url = config.page_url("inventory.php");
    pages.register(
        &config.page_url("worker.php?go=sellalluserfish"),
        move |state: &mut TrackerState, _content: &str, _url: &Url| {
            state.post(Outbound::FetchPage {
                url: inventory_url.clone(),
            });
            Ok(())
        },
    )?;
    Ok(())
}

pub fn visit_net_results(state: &mut TrackerState, content: &str, url: &Url) -> Result<()> {
    let result = parse_net_results(content, url)?;
    apply_activity(state, ActivityType::Fishing, ActivityKind::Net, result)
}

pub fn visit_fishing(state: &mut TrackerState, content: &str, url: &Url) -> Result<()> {
    let title = parse_page_title(content, url)?;
    if let Some(id) = title.id {
        state.locations.learn_name(ActivityType::Fishing, id, &title.name);
    }
    state.enter_view(ViewState::location(ActivityType::Fishing, title.name));
    Ok(())
}
