// src/ports/html.rs
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::instrument;

use crate::application::BoardState;
use crate::domain::{Identity, Note};

const INTRO: &str = "Please log comments and bugs below. With bugs please include as much \
details as possible and ideally include the steps to recreate. Thanks for taking the time \
to add logs.";

const STYLE: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 2rem auto;
            padding: 0 1rem;
            background-color: #f5f5f5;
        }
        dialog {
            position: static;
            border: 1px solid #ccc;
            border-radius: 8px;
            padding: 1rem;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }
        label {
            display: block;
            margin-top: 0.5rem;
        }
        .error {
            color: #b00020;
        }
        .note-image {
            max-width: 100%;
        }
        .account {
            text-align: right;
            font-size: 0.9em;
            color: #666;
        }
"#;

#[derive(Debug, Default)]
pub struct HtmlPresenter;

impl HtmlPresenter {
    pub fn new() -> Self {
        Self
    }

    fn page(&self, title: &str, body: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>"#,
            title = encode_text(title),
        )
    }

    fn render_note(&self, note: &Note) -> String {
        let name = encode_text(note.name.as_deref().unwrap_or_default());
        let description = encode_text(note.description.as_deref().unwrap_or_default());
        let image = match note.image.as_deref() {
            Some(url) if !url.is_empty() => format!(
                "\n            <img class=\"note-image\" src=\"{}\" alt=\"{}\">",
                encode_double_quoted_attribute(url),
                encode_double_quoted_attribute(note.name.as_deref().unwrap_or_default()),
            ),
            _ => String::new(),
        };

        format!(
            r#"        <li id="note-{id}">
            <p><b>{name}</b>:{description}</p>{image}
        </li>"#,
            id = encode_double_quoted_attribute(&note.id.0),
        )
    }

    /// The note board. `identity` is set when sign-in is enabled and adds the
    /// sign-out control.
    #[instrument(level = "trace", skip_all)]
    pub fn render(&self, state: &BoardState, identity: Option<&Identity>) -> String {
        let account = match identity {
            Some(identity) => format!(
                r#"    <div class="account">
        Signed in as {username}
        <form method="post" action="/sign-out"><button type="submit">Sign out</button></form>
    </div>
"#,
                username = encode_text(&identity.username),
            ),
            None => String::new(),
        };

        let notes: Vec<String> = state
            .visible_notes()
            .map(|note| self.render_note(note))
            .collect();

        let body = format!(
            r#"{account}    <p>{INTRO}</p>
    <form method="post" action="/dialog/toggle">
        <button type="submit">Add New Comment/Bug</button>
    </form>
    <dialog{open}>
        <form method="post" action="/notes" novalidate>
            <label for="noteName">Title</label>
            <input id="noteName" name="name" value="{name}">
            <label for="noteDescription">Comment</label>
            <textarea cols="30" id="noteDescription" name="description">{description}</textarea>
            <p class="error">{error}</p>
            <button type="submit">Save</button>
            <button type="submit" formaction="/dialog/close">Close</button>
        </form>
    </dialog>
    <ol>
{notes}
    </ol>"#,
            open = if state.is_dialog_open() { " open" } else { "" },
            name = encode_double_quoted_attribute(state.name()),
            description = encode_text(state.description()),
            error = encode_text(state.error_message()),
            notes = notes.join("\n"),
        );

        self.page("Comments and Bugs", &body)
    }

    /// Shown instead of the board until the browser is signed in
    pub fn render_sign_in(&self, message: &str) -> String {
        let body = format!(
            r#"    <h2>Sign in</h2>
    <form method="post" action="/sign-in">
        <label for="username">Username</label>
        <input required id="username" name="username" autocomplete="username">
        <label for="password">Password</label>
        <input required id="password" name="password" type="password" autocomplete="current-password">
        <p class="error">{message}</p>
        <button type="submit">Sign in</button>
    </form>"#,
            message = encode_text(message),
        );

        self.page("Sign in", &body)
    }
}
