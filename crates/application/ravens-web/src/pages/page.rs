//! A `Page` is one turn of the Model -> ViewModel -> View -> Controller
//! cycle, mounted at a path. It owns the navigation rules: who may see the
//! page, how the back link and history behave, and where a decision leads.

use axum::extract::{Form, Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use ravens_config::ApplicationConfig;
use ravens_core::{
    guard_allows, previous_page, step_back, Error, NextPaths, Result, ReturnState, ViewModel,
};
use ravens_session::Session;
use std::sync::Arc;
use tower_cookies::Cookies;

use crate::controllers::Controller;
use crate::request::{PageRequest, Pairs};
use crate::routes;
use crate::state::AppState;
use crate::view_models::ViewModelBuilder;
use crate::views::{Renderer, FORBIDDEN_VIEW};

/// Configuration of a page.
pub struct PageParameters {
    /// Where to serve this page from, relative to the path prefix.
    pub path: String,

    /// Which view renders this page.
    pub view: &'static str,

    /// Builds the values the view needs.
    pub view_model: Arc<dyn ViewModelBuilder>,

    /// Checks submissions and decides where to go next.
    pub controller: Arc<dyn Controller>,

    /// Pages of which the visitor must have submitted at least one before
    /// seeing this page. `None` for entry pages.
    pub guard_allow_previous: Option<Vec<String>>,

    /// Where this page can lead.
    pub next_paths: NextPaths,

    pub config: Arc<ApplicationConfig>,
}

/// How a request to a page turned out.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// The guard refused the visitor.
    Blocked,
    /// A GET: show the page.
    Rendering(ViewModel),
    /// A rejected POST: show the page again with errors.
    Redisplaying(ViewModel),
    /// An accepted POST: send the visitor on.
    Advancing {
        decision: ReturnState,
        location: String,
    },
}

pub struct Page {
    path: String,
    view: &'static str,
    view_model: Arc<dyn ViewModelBuilder>,
    controller: Arc<dyn Controller>,
    guard_allow_previous: Option<Vec<String>>,
    next_paths: NextPaths,
    config: Arc<ApplicationConfig>,
}

impl Page {
    pub fn new(parameters: PageParameters) -> Self {
        Self {
            path: parameters.path,
            view: parameters.view,
            view_model: parameters.view_model,
            controller: parameters.controller,
            guard_allow_previous: parameters.guard_allow_previous,
            next_paths: parameters.next_paths,
            config: parameters.config,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The route this page is served on, path prefix included.
    pub fn mount_path(&self) -> String {
        self.config.url(&self.path)
    }

    pub fn view(&self) -> &'static str {
        self.view
    }

    pub fn next_paths(&self) -> &NextPaths {
        &self.next_paths
    }

    /// Run one request against this page.
    ///
    /// Reads and writes the visitor's history and answers in `session`.
    /// Controller and view-model failures are returned untouched. A failed
    /// controller leaves the session as it was.
    pub async fn handle(&self, request: &PageRequest, session: &mut Session) -> Result<PageOutcome> {
        let previous_pages = session.previous_pages();
        let previous = previous_page(&previous_pages).map(str::to_string);
        let mut model = session.application_model();

        if !guard_allows(&previous_pages, self.guard_allow_previous.as_deref()) {
            tracing::debug!(page = %self.path, ?previous_pages, "Guard refused visitor");
            return Ok(PageOutcome::Blocked);
        }

        if request.method == Method::GET {
            let back_url = if request.is_back() {
                let step = step_back(&previous_pages, &self.path);
                tracing::debug!(page = %self.path, history = ?step.history, "Stepped back");
                session.set_previous_pages(&step.history)?;
                step.back_url
            } else {
                previous
            };

            let view_model = self
                .view_model
                .build(back_url, &model, &self.config, None)
                .await?;
            return Ok(PageOutcome::Rendering(view_model));
        }

        if request.method != Method::POST {
            return Err(Error::UnsupportedMethod {
                path: self.path.clone(),
                method: request.method.to_string(),
            });
        }

        let before = model.clone();
        let decision = self
            .controller
            .handle(request, &mut model, &self.config)
            .await?;
        if model != before {
            session.set_application_model(&model)?;
        }
        tracing::debug!(page = %self.path, %decision, "Controller decided");

        if !decision.is_advancing() {
            let errors = self.controller.check_errors(request);
            let view_model = self
                .view_model
                .build(previous, &model, &self.config, errors)
                .await?;
            return Ok(PageOutcome::Redisplaying(view_model));
        }

        let mut history = previous_pages;
        history.push(self.path.clone());
        session.set_previous_pages(&history)?;

        let location = self.config.url(self.next_paths.resolve(decision));
        Ok(PageOutcome::Advancing { decision, location })
    }

    /// Turn an outcome into an HTTP response.
    pub fn respond(&self, outcome: PageOutcome, views: &dyn Renderer) -> Response {
        match outcome {
            PageOutcome::Blocked => match views.render(FORBIDDEN_VIEW, None) {
                Ok(html) => (StatusCode::FORBIDDEN, Html(html)).into_response(),
                Err(e) => routes::internal_error(&self.path, &e),
            },
            PageOutcome::Rendering(view_model) | PageOutcome::Redisplaying(view_model) => {
                match views.render(self.view, Some(&view_model)) {
                    Ok(html) => Html(html).into_response(),
                    Err(e) => routes::internal_error(&self.path, &e),
                }
            }
            PageOutcome::Advancing { location, .. } => Redirect::to(&location).into_response(),
        }
    }

    /// GET and POST handlers for this page.
    pub fn into_router(self) -> Router<Arc<AppState>> {
        let mount_path = self.mount_path();
        let page = Arc::new(self);

        let on_get = {
            let page = page.clone();
            move |State(state): State<Arc<AppState>>,
                  cookies: Cookies,
                  Query(query): Query<Pairs>| {
                let page = page.clone();
                async move { routes::serve_page(page, state, cookies, PageRequest::get(query)).await }
            }
        };

        // A POST without a urlencoded body still reaches the controller, with
        // an empty form.
        let on_post = move |State(state): State<Arc<AppState>>,
                            cookies: Cookies,
                            form: Option<Form<Pairs>>| {
            let page = page.clone();
            let form = form.map(|Form(form)| form).unwrap_or_default();
            async move { routes::serve_page(page, state, cookies, PageRequest::post(form)).await }
        };

        Router::new().route(&mount_path, get(on_get).post(on_post))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ravens_core::{ApplicationModel, Errors};

    use crate::view_models::BaseViewModel;

    /// Always makes the same decision, optionally writing one answer.
    struct Scripted {
        decision: ReturnState,
        errors: Option<Errors>,
        answer: Option<(&'static str, &'static str)>,
    }

    impl Scripted {
        fn deciding(decision: ReturnState) -> Arc<Self> {
            Arc::new(Self {
                decision,
                errors: None,
                answer: None,
            })
        }
    }

    #[async_trait]
    impl Controller for Scripted {
        fn check_errors(&self, _request: &PageRequest) -> Option<Errors> {
            self.errors.clone()
        }

        async fn handle(
            &self,
            _request: &PageRequest,
            model: &mut ApplicationModel,
            _config: &ApplicationConfig,
        ) -> Result<ReturnState> {
            if let Some((key, value)) = self.answer {
                model.set(key, value)?;
            }
            Ok(self.decision)
        }
    }

    struct Failing;

    #[async_trait]
    impl Controller for Failing {
        fn check_errors(&self, _request: &PageRequest) -> Option<Errors> {
            None
        }

        async fn handle(
            &self,
            _request: &PageRequest,
            model: &mut ApplicationModel,
            _config: &ApplicationConfig,
        ) -> Result<ReturnState> {
            model.set("halfWritten", true)?;
            Err(Error::Controller("submission API unavailable".into()))
        }
    }

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn page(
        path: &str,
        guard: Option<&[&str]>,
        next_paths: NextPaths,
        controller: Arc<dyn Controller>,
    ) -> Page {
        Page::new(PageParameters {
            path: path.to_string(),
            view: "test-view",
            view_model: Arc::new(BaseViewModel),
            controller,
            guard_allow_previous: guard.map(paths),
            next_paths,
            config: Arc::new(ApplicationConfig::default()),
        })
    }

    fn session_with(history: &[&str]) -> Session {
        let mut session = Session::new();
        if !history.is_empty() {
            session.set_previous_pages(&paths(history)).unwrap();
        }
        session
    }

    fn post() -> PageRequest {
        PageRequest::post(Pairs::new())
    }

    #[tokio::test]
    async fn entry_page_gets_never_block_or_touch_history() {
        let intro = page(
            "/intro",
            None,
            NextPaths::new("/next"),
            Scripted::deciding(ReturnState::Primary),
        );

        for history in [&[][..], &["/intro"][..], &["/a", "/b"][..]] {
            let mut session = session_with(history);
            let before = session.clone();
            for _ in 0..3 {
                let outcome = intro
                    .handle(&PageRequest::default(), &mut session)
                    .await
                    .unwrap();
                assert!(matches!(outcome, PageOutcome::Rendering(_)));
            }
            assert_eq!(session, before);
        }
    }

    #[tokio::test]
    async fn get_uses_last_submitted_page_as_back_link() {
        let name = page(
            "/name",
            Some(&["/intro"]),
            NextPaths::new("/address"),
            Scripted::deciding(ReturnState::Primary),
        );
        let mut session = session_with(&["/intro", "/other"]);

        let outcome = name
            .handle(&PageRequest::default(), &mut session)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            PageOutcome::Rendering(ViewModel::new(Some("/other".into()), None))
        );
    }

    #[tokio::test]
    async fn guard_blocks_without_touching_session() {
        let name = page(
            "/name",
            Some(&["/intro"]),
            NextPaths::new("/address"),
            Scripted::deciding(ReturnState::Primary),
        );

        for request in [PageRequest::default(), PageRequest::back(), post()] {
            let mut session = session_with(&["/elsewhere"]);
            let before = session.clone();
            let outcome = name.handle(&request, &mut session).await.unwrap();
            assert_eq!(outcome, PageOutcome::Blocked);
            assert_eq!(session, before);
        }
    }

    #[tokio::test]
    async fn validation_error_redisplays_without_advancing() {
        let mut errors = Errors::new();
        errors.insert("noName".into(), true);
        let name = page(
            "/name",
            Some(&["/intro"]),
            NextPaths::new("/address"),
            Arc::new(Scripted {
                decision: ReturnState::ValidationError,
                errors: Some(errors.clone()),
                answer: None,
            }),
        );
        let mut session = session_with(&["/intro"]);

        let outcome = name.handle(&post(), &mut session).await.unwrap();

        assert_eq!(
            outcome,
            PageOutcome::Redisplaying(ViewModel::new(Some("/intro".into()), Some(errors)))
        );
        assert_eq!(session.previous_pages(), paths(&["/intro"]));
    }

    #[tokio::test]
    async fn primary_appends_once_and_redirects() {
        let name = page(
            "/name",
            Some(&["/intro"]),
            NextPaths::new("/address"),
            Scripted::deciding(ReturnState::Primary),
        );
        let mut session = session_with(&["/intro", "/name", "/intro"]);

        let outcome = name.handle(&post(), &mut session).await.unwrap();

        assert_eq!(
            outcome,
            PageOutcome::Advancing {
                decision: ReturnState::Primary,
                location: "/ravens/address".into(),
            }
        );
        assert_eq!(
            session.previous_pages(),
            paths(&["/intro", "/name", "/intro", "/name"])
        );
    }

    #[tokio::test]
    async fn every_branch_resolves_its_own_target() {
        let next = NextPaths::new("/p")
            .with_secondary("/s")
            .with_tertiary("/t")
            .with_quaternary("/q4")
            .with_quinary("/q5");
        let expected = [
            (ReturnState::Primary, "/ravens/p"),
            (ReturnState::Secondary, "/ravens/s"),
            (ReturnState::Tertiary, "/ravens/t"),
            (ReturnState::Quaternary, "/ravens/q4"),
            (ReturnState::Quinary, "/ravens/q5"),
        ];

        for (decision, location) in expected {
            let branching = page("/branch", None, next.clone(), Scripted::deciding(decision));
            let mut session = Session::new();
            let outcome = branching.handle(&post(), &mut session).await.unwrap();
            assert_eq!(
                outcome,
                PageOutcome::Advancing {
                    decision,
                    location: location.into(),
                }
            );
            assert_eq!(session.previous_pages(), paths(&["/branch"]));
        }
    }

    #[tokio::test]
    async fn missing_branch_target_goes_to_root() {
        let intro = page(
            "/intro",
            None,
            NextPaths::new("/whatever-comes-next"),
            Scripted::deciding(ReturnState::Secondary),
        );
        let mut session = Session::new();

        let outcome = intro.handle(&post(), &mut session).await.unwrap();
        assert_eq!(
            outcome,
            PageOutcome::Advancing {
                decision: ReturnState::Secondary,
                location: "/ravens/".into(),
            }
        );
    }

    #[tokio::test]
    async fn back_action_removes_own_visit() {
        let b = page(
            "/b",
            Some(&["/a"]),
            NextPaths::new("/c"),
            Scripted::deciding(ReturnState::Primary),
        );
        let mut session = session_with(&["/a", "/b", "/c"]);

        let outcome = b.handle(&PageRequest::back(), &mut session).await.unwrap();

        assert_eq!(
            outcome,
            PageOutcome::Rendering(ViewModel::new(Some("/a".into()), None))
        );
        assert_eq!(session.previous_pages(), paths(&["/a", "/c"]));
    }

    #[tokio::test]
    async fn back_onto_entry_page_empties_history() {
        let intro = page(
            "/intro",
            None,
            NextPaths::new("/name"),
            Scripted::deciding(ReturnState::Primary),
        );
        let mut session = session_with(&["/intro"]);

        let outcome = intro
            .handle(&PageRequest::back(), &mut session)
            .await
            .unwrap();

        assert_eq!(outcome, PageOutcome::Rendering(ViewModel::default()));
        assert!(session.previous_pages().is_empty());
    }

    #[tokio::test]
    async fn controller_answers_are_kept() {
        let name = page(
            "/name",
            None,
            NextPaths::new("/address"),
            Arc::new(Scripted {
                decision: ReturnState::Primary,
                errors: None,
                answer: Some(("fullName", "Corvus Corax")),
            }),
        );
        let mut session = Session::new();

        name.handle(&post(), &mut session).await.unwrap();

        assert_eq!(
            session.application_model().get::<String>("fullName").as_deref(),
            Some("Corvus Corax")
        );
    }

    #[tokio::test]
    async fn controller_failure_propagates_and_leaves_session() {
        let submit = page("/submit", None, NextPaths::new("/done"), Arc::new(Failing));
        let mut session = session_with(&["/intro"]);
        let before = session.clone();

        let err = submit.handle(&post(), &mut session).await.unwrap_err();

        assert!(matches!(err, Error::Controller(_)));
        assert_eq!(session, before);
    }

    #[tokio::test]
    async fn other_methods_are_rejected() {
        let intro = page(
            "/intro",
            None,
            NextPaths::new("/next"),
            Scripted::deciding(ReturnState::Primary),
        );
        let request = PageRequest {
            method: Method::DELETE,
            ..PageRequest::default()
        };

        let err = intro.handle(&request, &mut Session::new()).await.unwrap_err();
        assert!(matches!(err, Error::UnsupportedMethod { .. }));
    }
}
