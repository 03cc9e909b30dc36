//! The sandbox controller: owns the page state and drives both flows.

use tracing::{info, warn};
use web4::{
    GatewayRequest, Session, SnippetFlavor,
    endpoints::{LOGIN_PATH, LOGOUT_PATH},
    snippet::{NO_FORM_DATA, sign_snippet, view_snippet},
};

use crate::{
    dispatcher::{Gateway, Navigation, ViewOutput},
    state::{SandboxState, SignForm, Tab, ViewForm},
};

/// One sandbox page: session, forms and the gateway they talk to.
///
/// Every front-end builds its own `Sandbox`; nothing is shared between
/// instances except what the caller passes in.
pub struct Sandbox<G> {
    gateway: G,
    session: Session,
    state: SandboxState,
}

impl<G: Gateway> Sandbox<G> {
    /// Fresh page for `session`
    pub fn new(gateway: G, session: Session) -> Self {
        Self {
            gateway,
            session,
            state: SandboxState::default(),
        }
    }

    /// Gateway in use
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Login state read from the cookie
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current page state
    pub fn state(&self) -> &SandboxState {
        &self.state
    }

    /// Switch tabs; form contents survive the switch
    pub fn select_tab(&mut self, tab: Tab) {
        self.state.active_tab = tab;
    }

    /// View-call form, for editing
    pub fn view_form_mut(&mut self) -> &mut ViewForm {
        &mut self.state.view_form
    }

    /// Sign form, for editing
    pub fn sign_form_mut(&mut self) -> &mut SignForm {
        &mut self.state.sign_form
    }

    /// Build the view URL and record it as the preview without fetching
    pub fn preview_view(&mut self) -> String {
        let path = self.state.view_form.request().path();
        self.state.preview_url = Some(path.clone());
        path
    }

    /// Build the view URL, record it, GET it and keep the body (or the
    /// error text) as the view output.
    pub async fn submit_view(&mut self) -> &ViewOutput {
        let path = self.preview_view();
        info!("Calling view method: {}", path);

        let output = ViewOutput::from(self.gateway.fetch_text(&path).await);
        if let ViewOutput::Failed(message) = &output {
            warn!("View call failed: {}", message);
        }
        self.state.view_output.insert(output)
    }

    /// Build the sign URL, record it and return where the browser goes next
    pub fn submit_sign(&mut self) -> Navigation {
        let path = self.state.sign_form.request().path();
        info!("Redirecting to sign: {}", path);
        self.state.preview_url = Some(path.clone());
        Navigation::to(&self.gateway, &path)
    }

    /// Absolute form of the preview URL ("Try it")
    pub fn try_it(&self) -> Option<String> {
        self.state
            .preview_url
            .as_deref()
            .map(|path| self.gateway.resolve(path))
    }

    /// Snippet for the active tab's form, once a URL has been generated
    pub fn snippet(&self, flavor: SnippetFlavor) -> String {
        if self.state.preview_url.is_none() {
            return NO_FORM_DATA.to_string();
        }
        match self.state.active_tab {
            Tab::View => view_snippet(
                &self.state.view_form.request(),
                flavor,
                self.gateway.base_url(),
            ),
            Tab::Sign => sign_snippet(
                self.state.sign_form.request(),
                flavor,
                self.gateway.base_url(),
            ),
        }
    }

    /// Login or logout, whichever the session calls for
    pub fn session_navigation(&self) -> Navigation {
        Navigation::to(&self.gateway, self.session.action().path())
    }

    /// Navigate to the gateway login page
    pub fn login(&self) -> Navigation {
        Navigation::to(&self.gateway, LOGIN_PATH)
    }

    /// Navigate to the gateway logout page
    pub fn logout(&self) -> Navigation {
        Navigation::to(&self.gateway, LOGOUT_PATH)
    }

    /// Drop both forms, the preview and the output; keep tab and session
    pub fn reset(&mut self) {
        self.state = SandboxState {
            active_tab: self.state.active_tab,
            ..SandboxState::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::tests::StaticGateway;
    use pretty_assertions::assert_eq;
    use web4::SignField;

    fn sandbox(gateway: StaticGateway) -> Sandbox<StaticGateway> {
        Sandbox::new(gateway, Session::anonymous())
    }

    #[tokio::test]
    async fn test_submit_view_fetches_and_keeps_body() {
        let mut sandbox = sandbox(StaticGateway::ok("\"hello\""));
        let form = sandbox.view_form_mut();
        form.contract_id = "my.near".to_string();
        form.method_name = "get".to_string();
        form.set_key(0, "greeting");
        form.set_value(0, "hello");

        let output = sandbox.submit_view().await.clone();
        assert_eq!(output, ViewOutput::Body("\"hello\"".to_string()));
        assert_eq!(
            sandbox.gateway().requested(),
            vec!["/web4/contract/my.near/get?greeting=hello"]
        );
        assert_eq!(
            sandbox.state().preview_url.as_deref(),
            Some("/web4/contract/my.near/get?greeting=hello")
        );
        assert_eq!(
            sandbox.try_it().as_deref(),
            Some("http://gateway.test/web4/contract/my.near/get?greeting=hello")
        );
    }

    #[tokio::test]
    async fn test_failed_fetch_renders_error_text() {
        let mut sandbox = sandbox(StaticGateway::failing());
        sandbox.view_form_mut().contract_id = "my.near".to_string();
        sandbox.view_form_mut().method_name = "get".to_string();
        let output = sandbox.submit_view().await;
        assert!(
            output
                .render()
                .starts_with("Error: Failed to fetch http://gateway.test/web4/contract/my.near/get?: ")
        );
        assert!(sandbox.state().view_output.as_ref().unwrap().is_error());
    }

    #[test]
    fn test_submit_sign_navigates_without_fetching() {
        let mut sandbox = sandbox(StaticGateway::ok("unused"));
        sandbox.select_tab(Tab::Sign);
        sandbox.sign_form_mut().set(SignField::MethodName, "add_message");
        sandbox.sign_form_mut().set(SignField::Args, "{\"text\":\"hi\"}");

        let navigation = sandbox.submit_sign();
        assert_eq!(
            navigation.url,
            "http://gateway.test/web4/sign?web4_method_name=add_message&web4_args=%7B%22text%22%3A%22hi%22%7D"
        );
        assert!(sandbox.gateway().requested().is_empty());
        assert!(sandbox.snippet(SnippetFlavor::JavaScript).starts_with("// Sign Transaction"));
    }

    #[test]
    fn test_snippet_follows_active_tab() {
        let mut sandbox = sandbox(StaticGateway::ok(""));
        assert_eq!(sandbox.snippet(SnippetFlavor::JavaScript), NO_FORM_DATA);

        sandbox.view_form_mut().contract_id = "my.near".to_string();
        sandbox.preview_view();
        assert!(sandbox.snippet(SnippetFlavor::JavaScript).starts_with("// View Method Call"));
        assert!(sandbox.snippet(SnippetFlavor::Curl).starts_with("# View Method Call"));

        sandbox.select_tab(Tab::Sign);
        assert!(sandbox.snippet(SnippetFlavor::JavaScript).starts_with("// Sign Transaction"));
    }

    #[test]
    fn test_session_navigation() {
        let anonymous = sandbox(StaticGateway::ok(""));
        assert_eq!(
            anonymous.session_navigation().url,
            "http://gateway.test/web4/login"
        );

        let signed_in = Sandbox::new(StaticGateway::ok(""), Session::signed_in("alice.near"));
        assert_eq!(signed_in.session().account_id(), Some("alice.near"));
        assert_eq!(
            signed_in.session_navigation().url,
            "http://gateway.test/web4/logout"
        );
        assert_eq!(signed_in.login().url, "http://gateway.test/web4/login");
        assert_eq!(signed_in.logout().url, "http://gateway.test/web4/logout");
    }

    #[test]
    fn test_reset_keeps_tab() {
        let mut sandbox = sandbox(StaticGateway::ok(""));
        sandbox.select_tab(Tab::Sign);
        sandbox.sign_form_mut().set(SignField::Gas, "1");
        sandbox.submit_sign();

        sandbox.reset();
        assert_eq!(sandbox.state().active_tab, Tab::Sign);
        assert_eq!(sandbox.state().preview_url, None);
        assert_eq!(sandbox.state().sign_form, SignForm::default());
    }
}
