use axum::{extract::State, response::Html};

use crate::{
    templ_manager::LandingPage,
    web::{types::ContactForm, WebResult},
    AppState,
};

pub async fn home(State(app_state): State<AppState>) -> WebResult<Html<String>> {
    let form = ContactForm::default();
    let body = app_state
        .templ_mgr
        .render_landing_page(&LandingPage::new(&app_state.download, &form))?;

    Ok(Html(body))
}
