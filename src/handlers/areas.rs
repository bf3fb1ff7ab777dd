use url::Url;

use crate::config::TrackerConfig;
use crate::engine::dispatcher::PageRouter;
use crate::engine::state::TrackerState;
use crate::engine::view::ViewState;
use crate::error::Result;
use crate::extract::page::parse_page_title;

pub fn register(pages: &mut PageRouter, config: &TrackerConfig) -> Result<()> {
    pages.register(&config.page_url("xfarm.php?*"), |state: &mut TrackerState, _: &str, _: &Url| {
        state.enter_view(ViewState::Farm);
        Ok(())
    })?;
    pages.register(&config.page_url("pets.php"), |state: &mut TrackerState, _: &str, _: &Url| {
        state.enter_view(ViewState::Pets);
        Ok(())
    })?;
    pages.register(&config.page_url("pet.php?*"), visit_pet)?;

    for (&tag, path) in &config.area_pages {
        pages.register(&config.page_url(path), move |state: &mut TrackerState, _: &str, _: &Url| {
            state.enter_view(ViewState::area(tag));
            Ok(())
        })?;
    }
    Ok(())
}

pub fn visit_pet(state: &mut TrackerState, content: &str, url: &Url) -> Result<()> {
    let title = parse_page_title(content, url)?;
    state.enter_view(ViewState::pet(title.name));
    Ok(())
}
