//! Server-rendered HTML pages for the message form.

use askama::Template;

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Spam classifier</title></head>
<body>
<h1>Is it spam?</h1>
{% if let Some(error) = error %}<p class="error">{{ error }}</p>{% endif %}
<form method="post" action="/predict">
<textarea name="message" maxlength="{{ max_chars }}" rows="8" cols="60" required>{{ message }}</textarea>
<button type="submit">Predict</button>
</form>
</body>
</html>
"#
)]
pub struct IndexPage<'a> {
    pub error: Option<&'a str>,
    pub message: &'a str,
    pub max_chars: usize,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Prediction</title></head>
<body>
<h1>Prediction</h1>
<p class="prediction">{{ prediction }}</p>
<a href="/">Try another message</a>
</body>
</html>
"#
)]
pub struct ResultPage<'a> {
    pub prediction: &'a str,
}
