use actix_web::{http::header::ContentType, web, HttpResponse};
use htmlescape::encode_minimal;
use rand::Rng;
use std::fmt::Write;

use crate::config::SocialLink;
use crate::domain::countdown::CountdownDisplay;
use crate::startup::{ConfirmationVisibleFor, RegistrationUrl, SocialLinks};
use crate::store::Store;
use crate::views::{CountdownView, RegisterView, SubscribeView, SubscriptionAttempt};

const PARTICLES: usize = 30;
// (label, left, top)
const FLOATING_ICONS: [(&str, &str, &str); 4] = [
    ("sparkles", "8%", "15%"),
    ("book-open", "88%", "20%"),
    ("award", "10%", "80%"),
    ("graduation-cap", "85%", "75%"),
];

#[derive(serde::Deserialize)]
pub struct SubscribeForm {
    email: String,
}

#[derive(serde::Deserialize, Debug)]
pub struct LandingQuery {
    /// Set by the Register link once the event page has been opened.
    #[serde(default)]
    registered: bool,
}

#[tracing::instrument(
    name = "Landing page handler",
    skip(countdown, registration_url, social_links)
)]
pub async fn landing_page(
    query: web::Query<LandingQuery>,
    countdown: web::Data<CountdownView>,
    registration_url: web::Data<RegistrationUrl>,
    social_links: web::Data<SocialLinks>,
) -> HttpResponse {
    let mut register = RegisterView::new(registration_url.0.clone());
    if query.registered {
        register.register();
    }

    html(render(
        &countdown.snapshot(),
        &SubscriptionAttempt::default(),
        &register,
        &social_links.0,
    ))
}

/// Form fallback of the email capture: one subscribe view per request,
/// rendered with whatever state the submission left it in.
#[tracing::instrument(
    name = "Landing page form submission",
    skip(form, countdown, registration_url, social_links, store, visible_for),
    fields(subscriber_email = %form.email)
)]
pub async fn submit_landing_form(
    form: web::Form<SubscribeForm>,
    countdown: web::Data<CountdownView>,
    registration_url: web::Data<RegistrationUrl>,
    social_links: web::Data<SocialLinks>,
    store: web::Data<Store>,
    visible_for: web::Data<ConfirmationVisibleFor>,
) -> HttpResponse {
    let view = SubscribeView::new(store.get_ref().clone(), visible_for.0);
    view.set_email(form.into_inner().email);

    let outcome = view.submit().await;
    tracing::info!("Form submission finished with {:?}", outcome);

    html(render(
        &countdown.snapshot(),
        &view.attempt(),
        &RegisterView::new(registration_url.0.clone()),
        &social_links.0,
    ))
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

fn render(
    display: &CountdownDisplay,
    attempt: &SubscriptionAttempt,
    register: &RegisterView,
    social_links: &[SocialLink],
) -> String {
    let subscribe_html = if attempt.submitted {
        render_confirmation(social_links)
    } else {
        render_form(attempt)
    };
    let countdown = display.countdown;

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Learnsy Academy - Coming Soon</title>
    <style>
        body {{ margin: 0; min-height: 100vh; background: #0b0b0b; color: #fff; font-family: sans-serif; }}
        .particle {{ position: absolute; width: 4px; height: 4px; border-radius: 50%; background: #f5b800; }}
        .floating-icon {{ position: absolute; opacity: 0.2; }}
        main {{ position: relative; max-width: 640px; margin: 0 auto; padding: 4rem 1rem; text-align: center; }}
        .countdown span {{ display: inline-block; min-width: 4rem; }}
        .error {{ color: #ff6b6b; }}
    </style>
</head>
<body>
    <div class="particles">{particles}</div>
    {icons}
    <main>
        <img src="/_Learnsy.png" alt="Learnsy Academy Logo" width="160">
        <h1>We&apos;re Launching!</h1>
        <p>Something Amazing Is Coming Soon</p>
        <div class="countdown">
            <span id="days">{days}<br>Days</span>
            <span id="hours">{hours}<br>Hours</span>
            <span id="minutes">{minutes}<br>Minutes</span>
            <span id="seconds">{seconds}<br>Seconds</span>
        </div>
        <p id="launched"{launched_hidden}>The event has started</p>
        {register_html}
        <p>Receive Exclusive Launch Updates and Notifications</p>
        {subscribe_html}
    </main>
    <script>
        // Mirrors the server-side ticker once per second.
        setInterval(function () {{
            fetch("/countdown")
                .then(function (response) {{ return response.json(); }})
                .then(function (display) {{
                    ["days", "hours", "minutes", "seconds"].forEach(function (unit) {{
                        document.getElementById(unit).firstChild.nodeValue = display[unit];
                    }});
                    document.getElementById("launched").hidden = !display.launched;
                }})
                .catch(function () {{}});
        }}, 1000);
    </script>
</body>
</html>
"#,
        particles = render_particles(),
        icons = render_floating_icons(),
        days = countdown.days,
        hours = countdown.hours,
        minutes = countdown.minutes,
        seconds = countdown.seconds,
        launched_hidden = if display.launched { "" } else { " hidden" },
        register_html = render_register(register),
    )
}

fn render_register(register: &RegisterView) -> String {
    if register.is_registered() {
        return format!(
            r#"<p class="registered">You&apos;re registered! <a href="{}" target="_blank" rel="noopener noreferrer">Open the event page</a></p>"#,
            encode_minimal(register.registration_url())
        );
    }

    // The event page opens in a new tab while this one switches to the confirmation.
    String::from(
        r#"<p><a href="/register" target="_blank" rel="noopener noreferrer" onclick="window.location.search = '?registered=true'">Register</a></p>"#,
    )
}

fn render_form(attempt: &SubscriptionAttempt) -> String {
    let mut error_html = String::new();

    if let Some(error) = &attempt.error {
        // Writing into a String cannot fail.
        let _ = write!(error_html, r#"<p class="error">{}</p>"#, encode_minimal(error));
    }

    format!(
        r#"<form name="subscribe" action="/" method="post">
            <input
                type="email"
                name="email"
                placeholder="Enter your email address..."
                value="{email}"
                required
            >
            <button type="submit"{disabled}>Notify me</button>
            {error_html}
        </form>"#,
        email = encode_minimal(&attempt.email),
        disabled = if attempt.loading { " disabled" } else { "" },
    )
}

fn render_confirmation(social_links: &[SocialLink]) -> String {
    let mut links_html = String::new();

    for link in social_links {
        let _ = write!(
            links_html,
            r#"<a href="{}" target="_blank" rel="noopener noreferrer" aria-label="{label}">{label}</a>"#,
            encode_minimal(&link.href),
            label = encode_minimal(&link.label),
        );
    }

    format!(
        r#"<div class="success">
            <p>You&apos;re on the list!</p>
            <p>We&apos;ll notify you as soon as we launch</p>
            <div class="social-links">{links_html}</div>
        </div>"#
    )
}

fn render_particles() -> String {
    let mut rng = rand::thread_rng();
    let mut html = String::new();

    for _ in 0..PARTICLES {
        let _ = write!(
            html,
            r#"<div class="particle" style="left: {:.2}%; top: {:.2}%;"></div>"#,
            rng.gen_range(0.0..100.0),
            rng.gen_range(0.0..100.0),
        );
    }

    html
}

fn render_floating_icons() -> String {
    FLOATING_ICONS
        .iter()
        .map(|(icon, left, top)| {
            format!(
                r#"<div class="floating-icon" data-icon="{icon}" style="left: {left}; top: {top};"></div>"#
            )
        })
        .collect()
}
