use crate::templates::components::{form_input, form_textarea};
use crate::templates::{desktop_layout, Nav};
use crate::theme::Theme;
use maud::{html, Markup, PreEscaped};

// Reads the picked image as a data URI and posts the form as JSON.
const SUBMIT_SCRIPT: &str = r#"
document.getElementById('add-school').addEventListener('submit', function (ev) {
  ev.preventDefault();
  const form = ev.target;
  const status = document.getElementById('form-status');
  document.querySelectorAll('.field-error').forEach(function (el) { el.textContent = ''; });

  const v = function (id) { return document.getElementById(id).value; };

  const send = function (imageBase64) {
    const body = {
      name: v('name'),
      address: v('address'),
      city: v('city'),
      state: v('state'),
      contact: v('contact'),
      email_id: v('email_id'),
      imageBase64: imageBase64
    };
    fetch('/schools', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(body)
    }).then(function (res) {
      return res.json().then(function (data) { return { ok: res.ok, data: data }; });
    }).then(function (r) {
      if (r.ok) {
        status.textContent = r.data.message;
        form.reset();
        setTimeout(function () { window.location.href = '/'; }, 1000);
        return;
      }
      status.textContent = r.data.error || 'Error adding school';
      Object.entries(r.data.fields || {}).forEach(function (kv) {
        const el = document.getElementById('err-' + kv[0]);
        if (el) { el.textContent = kv[1]; }
      });
    }).catch(function () {
      status.textContent = 'Error adding school';
    });
  };

  const file = document.getElementById('image').files[0];
  if (!file) { send(''); return; }
  const reader = new FileReader();
  reader.onloadend = function () { send(reader.result); };
  reader.readAsDataURL(file);
});
"#;

pub fn add_school_page(theme: Theme) -> Markup {
    let nav = Nav {
        theme,
        show_add_school: false,
        show_back: true,
    };

    desktop_layout(
        "Add School",
        nav,
        html! {
            main style="max-width: 40rem" {
                h1 { "Add School" }
                form id="add-school" {
                    (form_input("School Name", "name", "text"))
                    (form_textarea("Address", "address"))
                    (form_input("City", "city", "text"))
                    (form_input("State", "state", "text"))
                    (form_input("Contact Number", "contact", "tel"))
                    (form_input("Email", "email_id", "email"))
                    div {
                        label for="image" { "School Image" }
                        br;
                        input type="file" id="image" name="image" accept="image/*";
                        p class="field-error" id="err-image" {}
                    }
                    button type="submit" { "Add School" }
                    p id="form-status" {}
                }
                script { (PreEscaped(SUBMIT_SCRIPT)) }
            }
        },
    )
}
