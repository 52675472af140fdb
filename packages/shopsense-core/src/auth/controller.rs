//! Authentication flow controller.
//!
//! Owns the login/signup mode state, runs submissions against the remote
//! gateway one at a time, writes the session on success and tells the
//! presentation host what to do next through an event callback.

use crate::auth::gateway::AuthGateway;
use crate::auth::routing::{destination_for_role, Destination};
use crate::auth::session::SessionStore;
use crate::auth::types::{AuthenticatedUser, Credential, RegistrationProfile};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Feedback shown when the service answers and rejects a credential pair.
const MSG_INVALID_CREDENTIALS: &str = "Invalid email or password";
/// Feedback shown when a registration goes through.
const MSG_SIGNUP_OK: &str = "Sign up successful!";
/// Feedback shown when a registration is rejected or a request fails outright.
const MSG_GENERIC_FAILURE: &str = "Something went wrong";

/// Which form the screen is showing. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowMode {
    Login,
    Signup,
}

/// What the controller tells its presentation host.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthFlowEvent {
    /// The active form changed, by user switch or after a registration.
    ModeChanged(FlowMode),
    /// One-shot user-facing notification text.
    Feedback(String),
    /// Emitted exactly once per successful sign-in, after the session write.
    Navigate(Destination),
}

/// Callback delivering [`AuthFlowEvent`]s to the presentation host.
pub type EventCallback = Box<dyn Fn(AuthFlowEvent) + Send + Sync>;

/// Drives the login/signup flow for one hosted screen.
///
/// At most one gateway call is in flight at a time; submissions arriving
/// while one is outstanding are ignored, not queued. After [`dispose`], a
/// call still in flight completes without touching the session or emitting
/// events.
///
/// [`dispose`]: AuthFlowController::dispose
pub struct AuthFlowController {
    gateway: Arc<dyn AuthGateway>,
    session: SessionStore,
    mode: Mutex<FlowMode>,
    in_flight: AtomicBool,
    disposed: AtomicBool,
    events: Option<EventCallback>,
}

impl AuthFlowController {
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        session: SessionStore,
        events: Option<EventCallback>,
    ) -> Self {
        Self {
            gateway,
            session,
            mode: Mutex::new(FlowMode::Login),
            in_flight: AtomicBool::new(false),
            disposed: AtomicBool::new(false),
            events,
        }
    }

    /// The currently active form.
    pub fn mode(&self) -> FlowMode {
        *self.mode.lock().unwrap()
    }

    /// Switch between the login and signup forms.
    ///
    /// Refused while a request is in flight, so a late response can never be
    /// presented against the wrong form. Returns whether the switch was
    /// applied.
    pub fn switch_mode(&self, target: FlowMode) -> bool {
        if self.in_flight.load(Ordering::Acquire) {
            tracing::debug!("Ignoring mode switch while a request is in flight");
            return false;
        }
        self.set_mode(target);
        true
    }

    /// Submit the login form.
    ///
    /// Returns `false` when the submission was ignored because another
    /// request is still outstanding; every other outcome is reported through
    /// events.
    pub async fn submit_login(&self, email: &str, password: &str) -> bool {
        if !self.begin_request() {
            tracing::debug!("Ignoring login submission while a request is in flight");
            return false;
        }

        // Format and correctness checks are the backend's job; the client
        // sends the fields as entered.
        let credential = Credential::new(email, password);
        let result = self.gateway.authenticate(&credential).await;

        if self.disposed.load(Ordering::Acquire) {
            tracing::debug!("Login completed after dispose, dropping the result");
        } else {
            match result {
                Ok(Some(user)) => self.complete_login(user),
                Ok(None) => {
                    tracing::info!("Sign-in rejected for {}", credential.email);
                    self.emit(AuthFlowEvent::Feedback(MSG_INVALID_CREDENTIALS.to_string()));
                }
                Err(e) => {
                    tracing::warn!("Sign-in request failed: {}", e);
                    self.emit(AuthFlowEvent::Feedback(MSG_GENERIC_FAILURE.to_string()));
                }
            }
        }

        self.finish_request();
        true
    }

    /// Submit the signup form.
    ///
    /// The server-fixed profile fields (status, verification flag, role) are
    /// filled in here; callers only supply what the form collects. On
    /// success the flow returns to the login form, the new account is not
    /// signed in automatically. Returns `false` when the submission was
    /// ignored because another request is still outstanding.
    pub async fn submit_signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        address: &str,
    ) -> bool {
        if !self.begin_request() {
            tracing::debug!("Ignoring signup submission while a request is in flight");
            return false;
        }

        let profile = RegistrationProfile::new(name, email, password, address);
        let result = self.gateway.register(&profile).await;

        if self.disposed.load(Ordering::Acquire) {
            tracing::debug!("Signup completed after dispose, dropping the result");
        } else {
            match result {
                Ok(true) => {
                    tracing::info!("Registration accepted for {}", profile.email);
                    self.emit(AuthFlowEvent::Feedback(MSG_SIGNUP_OK.to_string()));
                    self.set_mode(FlowMode::Login);
                }
                Ok(false) => {
                    tracing::info!("Registration rejected for {}", profile.email);
                    self.emit(AuthFlowEvent::Feedback(MSG_GENERIC_FAILURE.to_string()));
                }
                Err(e) => {
                    tracing::warn!("Sign-up request failed: {}", e);
                    self.emit(AuthFlowEvent::Feedback(MSG_GENERIC_FAILURE.to_string()));
                }
            }
        }

        self.finish_request();
        true
    }

    /// Mark the hosting screen as torn down.
    ///
    /// A call still in flight will complete without a session write, a
    /// navigation or any feedback.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }

    fn complete_login(&self, user: AuthenticatedUser) {
        // The session write must precede the navigation event.
        self.session.set_current_user(user.id);
        let destination = destination_for_role(&user.role);
        tracing::info!(
            "Sign-in succeeded for {} (role {:?} -> {:?})",
            user.email,
            user.role,
            destination
        );
        self.emit(AuthFlowEvent::Navigate(destination));
        self.emit(AuthFlowEvent::Feedback(format!("Welcome, {}!", user.name)));
    }

    fn set_mode(&self, target: FlowMode) {
        let mut mode = self.mode.lock().unwrap();
        if *mode != target {
            *mode = target;
            drop(mode);
            self.emit(AuthFlowEvent::ModeChanged(target));
        }
    }

    fn emit(&self, event: AuthFlowEvent) {
        if self.disposed.load(Ordering::Acquire) {
            return;
        }
        if let Some(events) = &self.events {
            events(event);
        }
    }

    fn begin_request(&self) -> bool {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn finish_request(&self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::gateway::GatewayError;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    type LoginResult = Result<Option<AuthenticatedUser>, GatewayError>;
    type RegisterResult = Result<bool, GatewayError>;

    /// Gateway fake returning queued results, optionally holding each call
    /// until the test releases it.
    struct FakeGateway {
        login_results: Mutex<Vec<LoginResult>>,
        register_results: Mutex<Vec<RegisterResult>>,
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    impl FakeGateway {
        fn new() -> Self {
            Self {
                login_results: Mutex::new(Vec::new()),
                register_results: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        fn logins(results: Vec<LoginResult>) -> Self {
            let mut gateway = Self::new();
            gateway.login_results = Mutex::new(results);
            gateway
        }

        fn registrations(results: Vec<RegisterResult>) -> Self {
            let mut gateway = Self::new();
            gateway.register_results = Mutex::new(results);
            gateway
        }

        fn gated(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }

        async fn wait_for_call(&self) {
            while self.calls.load(Ordering::SeqCst) == 0 {
                tokio::task::yield_now().await;
            }
        }
    }

    #[async_trait::async_trait]
    impl AuthGateway for FakeGateway {
        async fn authenticate(&self, _credential: &Credential) -> LoginResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.login_results.lock().unwrap().remove(0)
        }

        async fn register(&self, _profile: &RegistrationProfile) -> RegisterResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.register_results.lock().unwrap().remove(0)
        }
    }

    fn user(role: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            id: 7,
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            role: role.to_string(),
        }
    }

    fn transport_error() -> GatewayError {
        GatewayError::Transport("connection refused".to_string())
    }

    struct Harness {
        controller: Arc<AuthFlowController>,
        session: SessionStore,
        events: Arc<Mutex<Vec<AuthFlowEvent>>>,
        gateway: Arc<FakeGateway>,
    }

    /// Controller wired to a fresh session and an event recorder that also
    /// checks the session is already written whenever a navigation fires.
    fn harness(gateway: FakeGateway) -> Harness {
        let gateway = Arc::new(gateway);
        let session = SessionStore::new();
        let events: Arc<Mutex<Vec<AuthFlowEvent>>> = Arc::new(Mutex::new(Vec::new()));

        let callback: EventCallback = {
            let session = session.clone();
            let events = events.clone();
            Box::new(move |event| {
                if matches!(event, AuthFlowEvent::Navigate(_)) {
                    assert!(
                        session.is_signed_in(),
                        "session must be written before navigation"
                    );
                }
                events.lock().unwrap().push(event);
            })
        };

        let controller = Arc::new(AuthFlowController::new(
            gateway.clone(),
            session.clone(),
            Some(callback),
        ));
        Harness {
            controller,
            session,
            events,
            gateway,
        }
    }

    fn feedback(events: &[AuthFlowEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|e| match e {
                AuthFlowEvent::Feedback(msg) => Some(msg.clone()),
                _ => None,
            })
            .collect()
    }

    fn navigations(events: &[AuthFlowEvent]) -> Vec<Destination> {
        events
            .iter()
            .filter_map(|e| match e {
                AuthFlowEvent::Navigate(dest) => Some(*dest),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn starts_in_login_mode() {
        let h = harness(FakeGateway::new());
        assert_eq!(h.controller.mode(), FlowMode::Login);
    }

    #[test]
    fn switch_mode_emits_only_on_transition() {
        let h = harness(FakeGateway::new());

        assert!(h.controller.switch_mode(FlowMode::Signup));
        assert_eq!(h.controller.mode(), FlowMode::Signup);
        // Re-selecting the active mode is a no-op.
        assert!(h.controller.switch_mode(FlowMode::Signup));
        assert!(h.controller.switch_mode(FlowMode::Login));

        let events = h.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                AuthFlowEvent::ModeChanged(FlowMode::Signup),
                AuthFlowEvent::ModeChanged(FlowMode::Login),
            ]
        );
    }

    #[tokio::test]
    async fn rejected_login_keeps_mode_and_session() {
        let h = harness(FakeGateway::logins(vec![Ok(None)]));

        assert!(h.controller.submit_login("jane@example.com", "wrong").await);

        assert_eq!(h.controller.mode(), FlowMode::Login);
        assert!(!h.session.is_signed_in());
        let events = h.events.lock().unwrap();
        assert_eq!(feedback(&events), vec!["Invalid email or password"]);
        assert!(navigations(&events).is_empty());
    }

    #[tokio::test]
    async fn admin_login_routes_to_admin_home() {
        let h = harness(FakeGateway::logins(vec![Ok(Some(user("ADMIN")))]));

        assert!(h.controller.submit_login("jane@example.com", "secret").await);

        assert_eq!(h.session.current_user_id(), Some(7));
        let events = h.events.lock().unwrap();
        assert_eq!(navigations(&events), vec![Destination::AdminHome]);
        assert_eq!(feedback(&events), vec!["Welcome, Jane!"]);
    }

    #[tokio::test]
    async fn non_admin_roles_route_to_default_home() {
        for role in ["CUSTOMER", "admin", ""] {
            let h = harness(FakeGateway::logins(vec![Ok(Some(user(role)))]));

            assert!(h.controller.submit_login("jane@example.com", "secret").await);

            let events = h.events.lock().unwrap();
            assert_eq!(
                navigations(&events),
                vec![Destination::DefaultHome],
                "role {role:?}"
            );
        }
    }

    #[tokio::test]
    async fn login_transport_failure_is_not_invalid_credentials() {
        let h = harness(FakeGateway::logins(vec![Err(transport_error())]));

        assert!(h.controller.submit_login("jane@example.com", "secret").await);

        assert!(!h.session.is_signed_in());
        let events = h.events.lock().unwrap();
        assert_eq!(feedback(&events), vec!["Something went wrong"]);
        assert!(navigations(&events).is_empty());
    }

    #[tokio::test]
    async fn successful_signup_returns_to_login() {
        let h = harness(FakeGateway::registrations(vec![Ok(true)]));
        h.controller.switch_mode(FlowMode::Signup);

        assert!(
            h.controller
                .submit_signup("Jane", "jane@example.com", "secret", "1 Main St")
                .await
        );

        assert_eq!(h.controller.mode(), FlowMode::Login);
        assert!(!h.session.is_signed_in());
        let events = h.events.lock().unwrap();
        assert_eq!(feedback(&events), vec!["Sign up successful!"]);
        assert!(events.contains(&AuthFlowEvent::ModeChanged(FlowMode::Login)));
    }

    #[tokio::test]
    async fn rejected_signup_stays_in_signup() {
        let h = harness(FakeGateway::registrations(vec![Ok(false)]));
        h.controller.switch_mode(FlowMode::Signup);

        assert!(
            h.controller
                .submit_signup("Jane", "jane@example.com", "secret", "1 Main St")
                .await
        );

        assert_eq!(h.controller.mode(), FlowMode::Signup);
        let events = h.events.lock().unwrap();
        assert_eq!(feedback(&events), vec!["Something went wrong"]);
    }

    #[tokio::test]
    async fn signup_transport_failure_stays_in_signup() {
        let h = harness(FakeGateway::registrations(vec![Err(transport_error())]));
        h.controller.switch_mode(FlowMode::Signup);

        assert!(
            h.controller
                .submit_signup("Jane", "jane@example.com", "secret", "1 Main St")
                .await
        );

        assert_eq!(h.controller.mode(), FlowMode::Signup);
        let events = h.events.lock().unwrap();
        assert_eq!(feedback(&events), vec!["Something went wrong"]);
    }

    #[tokio::test]
    async fn second_submission_while_in_flight_is_ignored() {
        let gate = Arc::new(Notify::new());
        let h = harness(FakeGateway::logins(vec![Ok(Some(user("ADMIN")))]).gated(gate.clone()));

        let first = {
            let controller = h.controller.clone();
            tokio::spawn(async move { controller.submit_login("jane@example.com", "secret").await })
        };
        h.gateway.wait_for_call().await;

        assert!(!h.controller.submit_login("jane@example.com", "secret").await);

        gate.notify_one();
        assert!(first.await.unwrap());

        assert_eq!(h.gateway.calls.load(Ordering::SeqCst), 1);
        let events = h.events.lock().unwrap();
        assert_eq!(navigations(&events), vec![Destination::AdminHome]);
    }

    #[tokio::test]
    async fn switch_mode_refused_while_in_flight() {
        let gate = Arc::new(Notify::new());
        let h = harness(FakeGateway::logins(vec![Ok(None)]).gated(gate.clone()));

        let first = {
            let controller = h.controller.clone();
            tokio::spawn(async move { controller.submit_login("jane@example.com", "secret").await })
        };
        h.gateway.wait_for_call().await;

        assert!(!h.controller.switch_mode(FlowMode::Signup));
        assert_eq!(h.controller.mode(), FlowMode::Login);

        gate.notify_one();
        first.await.unwrap();

        // With the request settled, switching works again.
        assert!(h.controller.switch_mode(FlowMode::Signup));
    }

    #[tokio::test]
    async fn completion_after_dispose_is_inert() {
        let gate = Arc::new(Notify::new());
        let h = harness(FakeGateway::logins(vec![Ok(Some(user("ADMIN")))]).gated(gate.clone()));

        let first = {
            let controller = h.controller.clone();
            tokio::spawn(async move { controller.submit_login("jane@example.com", "secret").await })
        };
        h.gateway.wait_for_call().await;

        h.controller.dispose();
        gate.notify_one();
        first.await.unwrap();

        assert!(!h.session.is_signed_in());
        assert!(h.events.lock().unwrap().is_empty());
    }
}
