use doclib_client::app::App;
use doclib_client::config::Config;
use doclib_client::utils::logging;
use tokio_util::sync::CancellationToken;

// These tests need a reachable backend and valid DOCLIB_* env configuration,
// so they are ignored by default: cargo test -- --ignored

#[tokio::test]
#[ignore]
async fn test_login_with_configured_credentials() {
    logging::init(true);

    let config = Config::load();
    assert!(
        !config.login_email.is_empty(),
        "set DOCLIB_LOGIN_EMAIL / DOCLIB_LOGIN_PASSWORD to run this test"
    );

    let app = App::initialize(config.clone()).expect("app initialization failed");
    let session = app
        .auth()
        .login(&config.login_email, &config.login_password)
        .await
        .expect("login failed");

    assert!(!session.token.is_empty());
    assert_eq!(session.user.email, config.login_email);
    assert!(app.session().is_authenticated());
}

#[tokio::test]
#[ignore]
async fn test_load_document_view_as_guest() {
    logging::init(true);

    let config = Config::load();
    assert!(
        !config.document_id.is_empty(),
        "set DOCLIB_DOCUMENT_ID to run this test"
    );

    let app = App::initialize(config.clone()).expect("app initialization failed");
    let cancel = CancellationToken::new();
    let view = app
        .view_loader()
        .load(&config.document_id, &cancel)
        .await
        .expect("document view load failed");

    assert_eq!(view.document.id, config.document_id);
    assert!(view.access.total_pages > 0);
    // A fresh App with no persisted session browses as guest
    if !app.session().is_authenticated() {
        assert!(!view.access.is_authenticated);
        assert!(view.access.last_read_page.is_none());
    }
}

#[tokio::test]
#[ignore]
async fn test_submission_refresh() {
    logging::init(true);

    let config = Config::load();
    let submission_id =
        std::env::var("DOCLIB_SUBMISSION_ID").expect("set DOCLIB_SUBMISSION_ID to run this test");

    let app = App::initialize(config.clone()).expect("app initialization failed");
    app.auth()
        .login(&config.login_email, &config.login_password)
        .await
        .expect("login failed");

    let workflow = app.workflow();
    let (info, history) = workflow
        .refresh(&submission_id)
        .await
        .expect("submission refresh failed");

    assert_eq!(info.id, submission_id);
    assert!(!history.is_empty(), "a submission always has a Submit entry");
}
