//! Account scenarios. All of them need credentials from the config.

use super::{editable_user, ensure, existing_user, tags, Scenario};
use crate::config::Credentials;
use crate::driver::Driver;
use crate::pages::{Login, PageObject, Session, UserEdit};
use crate::result::ProbeResult;
use crate::verify::Assertion;
use uuid::Uuid;

pub(super) fn scenarios<D: Driver>() -> Vec<Scenario<D>> {
    vec![
        Scenario::new(
            "account::login_logout",
            &[tags::ACCOUNT, tags::LOGIN],
            login_logout,
        ),
        Scenario::new(
            "account::login_required",
            &[tags::ACCOUNT, tags::LOGIN, tags::NAVIGATION],
            login_required,
        ),
        Scenario::new(
            "account::edit_profile",
            &[tags::ACCOUNT, tags::LOGIN],
            edit_profile,
        ),
        Scenario::new(
            "account::hide_email",
            &[tags::ACCOUNT, tags::LOGIN],
            hide_email,
        ),
    ]
}

fn login_logout<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let user = existing_user(session)?;
    let mut home = session.home()?;
    let login_visible = home.header().is_login_link_visible()?;
    let register_visible = home.header().is_register_link_visible()?;
    ensure(
        home.session(),
        Assertion::is_true("login link shown to visitors", login_visible),
    )?;
    ensure(
        home.session(),
        Assertion::is_true("register link shown to visitors", register_visible),
    )?;

    let mut home = home.header().login(&user)?;
    let logged_in = home.header().is_logged_in()?;
    ensure(home.session(), Assertion::is_true("logged in", logged_in))?;
    let shown = home.header().user_name()?;
    if let Some(expected) = &user.display_name {
        ensure(
            home.session(),
            Assertion::equals("header user name", expected.as_str(), shown.as_str()),
        )?;
    }

    let mut home = home.header().logout()?;
    let logged_in = home.header().is_logged_in()?;
    let login_visible = home.header().is_login_link_visible()?;
    ensure(home.session(), Assertion::is_false("logged in after logout", logged_in))?;
    ensure(
        home.session(),
        Assertion::is_true("login link back after logout", login_visible),
    )
}

fn login_required<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let user = existing_user(session)?;
    session.goto("users/edit")?;
    let login = Login::attach(session)?;
    let mut edit: UserEdit<'_, D> = login.login_to(&user)?;
    let url = edit.current_url()?;
    ensure(
        edit.session(),
        Assertion::contains("redirected back to the editor", &url, "users/edit"),
    )
}

type ProfileFields = (String, String, String);

fn edit_profile<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let user = editable_user(session)?;
    let original = {
        let mut edit = UserEdit::open(&mut *session, &user)?;
        (edit.display_name()?, edit.location()?, edit.occupation()?)
    };
    let outcome = change_profile(&mut *session, &user);
    let restored = restore_profile(session, &user, &original);
    after_restore(outcome, restored)
}

fn change_profile<D: Driver>(session: &mut Session<D>, user: &Credentials) -> ProbeResult<()> {
    let mut edit = UserEdit::open(session, user)?;
    let tag = Uuid::new_v4().simple().to_string();
    let tag = &tag[..8];
    let name = format!("qa {tag}");
    let location = format!("Lisbon {tag}");
    let occupation = format!("tester {tag}");
    edit.set_display_name(&name)?;
    edit.set_location(&location)?;
    edit.set_occupation(&occupation)?;
    let notice = edit.update()?;
    ensure(
        edit.session(),
        Assertion::contains("update notice", &notice, "Profile Updated"),
    )?;

    let saved = (edit.display_name()?, edit.location()?, edit.occupation()?);
    ensure(
        edit.session(),
        Assertion::equals(
            "saved profile fields",
            &(name.clone(), location.clone(), occupation),
            &saved,
        ),
    )?;

    let mut profile = edit.header().click_view_profile()?;
    let shown_name = profile.name()?;
    let shown_location = profile.location()?;
    ensure(
        profile.session(),
        Assertion::equals("profile name", name.as_str(), shown_name.as_str()),
    )?;
    ensure(
        profile.session(),
        Assertion::equals("profile location", &Some(location), &shown_location),
    )
}

fn restore_profile<D: Driver>(
    session: &mut Session<D>,
    user: &Credentials,
    original: &ProfileFields,
) -> ProbeResult<()> {
    let mut edit = UserEdit::open(session, user)?;
    edit.set_display_name(&original.0)?;
    edit.set_location(&original.1)?;
    edit.set_occupation(&original.2)?;
    let _ = edit.update()?;
    tracing::info!("profile restored");
    Ok(())
}

fn hide_email<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let user = editable_user(session)?;
    let originally_hidden = UserEdit::open(&mut *session, &user)?.is_email_hidden()?;
    let outcome = toggle_email(&mut *session, &user);
    let restored = restore_email(session, &user, originally_hidden);
    after_restore(outcome, restored)
}

fn toggle_email<D: Driver>(session: &mut Session<D>, user: &Credentials) -> ProbeResult<()> {
    let mut edit = UserEdit::open(session, user)?;
    edit.set_email_hidden(false)?;
    let _ = edit.update()?;
    let mut profile = edit.header().click_view_profile()?;
    let visible = profile.is_email_visible()?;
    let email = profile.email()?;
    ensure(
        profile.session(),
        Assertion::is_true("email shown when not hidden", visible),
    )?;
    ensure(
        profile.session(),
        Assertion::equals("profile email", &Some(user.email.clone()), &email),
    )?;

    let mut edit = profile.header().click_edit_profile()?;
    edit.set_email_hidden(true)?;
    let _ = edit.update()?;
    let still_hidden = edit.is_email_hidden()?;
    let mut profile = edit.header().click_view_profile()?;
    let visible = profile.is_email_visible()?;
    ensure(
        profile.session(),
        Assertion::is_true("hide email stays checked", still_hidden),
    )?;
    ensure(
        profile.session(),
        Assertion::is_false("email shown while hidden", visible),
    )
}

fn restore_email<D: Driver>(
    session: &mut Session<D>,
    user: &Credentials,
    hidden: bool,
) -> ProbeResult<()> {
    let mut edit = UserEdit::open(session, user)?;
    if edit.is_email_hidden()? != hidden {
        edit.set_email_hidden(hidden)?;
        let _ = edit.update()?;
    }
    Ok(())
}

/// The scenario's own failure wins over a failed restore
fn after_restore(outcome: ProbeResult<()>, restored: ProbeResult<()>) -> ProbeResult<()> {
    match (outcome, restored) {
        (Ok(()), restored) => restored,
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(restore_error)) => {
            tracing::warn!(error = %restore_error, "account not restored");
            Err(e)
        }
    }
}
