//! Composition of one interactive run: login, load, fill, submit.

use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::application::{FormSession, LoadOutcome, LoginService};
use crate::config::PlayerConfig;
use crate::infrastructure::terminal::{prompt_login, run_session, SessionExit, TerminalSurface};
use crate::ports::outbound::{FormSinkPort, FormSourcePort, IdentityPort};

/// Adapters the runner talks to.
#[derive(Clone)]
pub struct RunnerDeps {
    pub source: Arc<dyn FormSourcePort>,
    pub sink: Arc<dyn FormSinkPort>,
    pub identity: Arc<dyn IdentityPort>,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Input ended before a successful login
    NotLoggedIn,
    /// The form could not be fetched
    LoadFailed,
    Finished(SessionExit),
}

/// Drive one session over `input`/`output` until the user quits.
pub async fn run<R, W>(
    config: &PlayerConfig,
    deps: RunnerDeps,
    mut input: R,
    output: W,
) -> anyhow::Result<RunOutcome>
where
    R: BufRead,
    W: Write + Send + 'static,
{
    let surface = Arc::new(TerminalSurface::new(output));
    let login = LoginService::new(deps.identity.clone());

    let Some(session_key) = prompt_login(
        &mut input,
        &surface,
        &login,
        config.roll_number.as_deref(),
        config.name.as_deref(),
    )
    .await?
    else {
        return Ok(RunOutcome::NotLoggedIn);
    };

    let mut session = FormSession::new(session_key).with_surface(surface.clone());
    tracing::info!(session_id = %session.id(), session_key = %session.session_key(), "Form session started");

    if session.load(deps.source.as_ref()).await? != LoadOutcome::Loaded {
        session.teardown();
        return Ok(RunOutcome::LoadFailed);
    }

    let exit = run_session(&mut session, &mut input, &surface, deps.sink.as_ref()).await?;
    session.teardown();
    Ok(RunOutcome::Finished(exit))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::infrastructure::testing::fixtures::{key, name_contact_schema, SharedBuffer};
    use crate::ports::outbound::{
        FetchError, MockFormSinkPort, MockFormSourcePort, MockIdentityPort,
    };
    use formwalk_shared::CreateUserResponse;
    use mockall::predicate::*;

    fn config() -> PlayerConfig {
        PlayerConfig::from_lookup(|_| None).unwrap()
    }

    fn identity_ok() -> Arc<MockIdentityPort> {
        let mut identity = MockIdentityPort::new();
        identity
            .expect_create_user()
            .returning(|_| Ok(CreateUserResponse::default()));
        Arc::new(identity)
    }

    #[tokio::test]
    async fn logs_in_fills_and_submits() {
        let mut source = MockFormSourcePort::new();
        source
            .expect_fetch_form()
            .with(eq(key("RA001")))
            .times(1)
            .returning(|_| Ok(name_contact_schema()));
        let mut sink = MockFormSinkPort::new();
        sink.expect_submit()
            .withf(|s| s.session_key.as_str() == "RA001" && s.values.len() == 2)
            .times(1)
            .returning(|_| Ok(()));

        let deps = RunnerDeps {
            source: Arc::new(source),
            sink: Arc::new(sink),
            identity: identity_ok(),
        };
        let input = Cursor::new("RA001\nAnn\nset name Ann\nnext\nset contact ann@example.com\nsubmit\nquit\n");
        let output = SharedBuffer::default();

        let outcome = run(&config(), deps, input, output.clone()).await.unwrap();
        assert_eq!(outcome, RunOutcome::Finished(SessionExit::Quit));
        assert!(output.contents().contains("Form submitted."));
    }

    #[tokio::test]
    async fn stops_when_the_form_cannot_be_fetched() {
        let mut source = MockFormSourcePort::new();
        source
            .expect_fetch_form()
            .returning(|_| Err(FetchError::RequestFailed("connection refused".into())));
        let mut sink = MockFormSinkPort::new();
        sink.expect_submit().never();

        let deps = RunnerDeps {
            source: Arc::new(source),
            sink: Arc::new(sink),
            identity: identity_ok(),
        };
        let output = SharedBuffer::default();

        let outcome = run(&config(), deps, Cursor::new("RA001\nAnn\n"), output.clone())
            .await
            .unwrap();
        assert_eq!(outcome, RunOutcome::LoadFailed);
        assert!(output
            .contents()
            .contains("Could not load the form: Request failed: connection refused"));
    }

    #[tokio::test]
    async fn nothing_happens_without_login_input() {
        let mut source = MockFormSourcePort::new();
        source.expect_fetch_form().never();
        let deps = RunnerDeps {
            source: Arc::new(source),
            sink: Arc::new(MockFormSinkPort::new()),
            identity: Arc::new(MockIdentityPort::new()),
        };

        let outcome = run(&config(), deps, Cursor::new(""), SharedBuffer::default())
            .await
            .unwrap();
        assert_eq!(outcome, RunOutcome::NotLoggedIn);
    }
}
