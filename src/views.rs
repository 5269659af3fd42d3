//! Páginas HTML
//!
//! Três páginas simples montadas com `format!`: formulário de upload,
//! resultado (link compartilhado) e erro. Todo texto vindo do usuário ou do
//! Box passa por `escape_html`.

use axum::http::StatusCode;
use axum::response::Html;

use crate::services::upload::UploadOutcome;
use crate::utils::escape_html;

const STYLE: &str = r#"
            <style>
                body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Arial, sans-serif;
                       max-width: 720px; margin: 50px auto; padding: 20px; background: #f5f5f5; }
                .container { background: white; padding: 30px; border-radius: 12px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
                .notice { background: #fff3cd; border: 2px solid #ffc107; padding: 12px 20px; border-radius: 8px; margin-bottom: 20px; }
                .success { background: #d4edda; border: 2px solid #28a745; padding: 20px; border-radius: 8px; margin-bottom: 20px; }
                .error { background: #f8d7da; border: 2px solid #dc3545; padding: 20px; border-radius: 8px; }
                .link-box { background: #d1ecf1; padding: 20px; border: 2px solid #17a2b8; border-radius: 8px; margin: 20px 0;
                            word-break: break-all; }
                button { background: #0061d5; color: white; padding: 12px 24px; border: none;
                         border-radius: 6px; cursor: pointer; font-size: 14px; font-weight: bold; }
                button:hover { background: #004eaa; }
                code { background: #eee; padding: 2px 6px; border-radius: 4px; }
                h1 { margin-top: 0; }
            </style>"#;

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
        <html>
        <head>
            <title>{title}</title>
            <meta charset="UTF-8">{style}
        </head>
        <body>
            <div class="container">
{body}
            </div>
        </body>
        </html>"#,
        title = title,
        style = STYLE,
        body = body
    ))
}

/// GET /upload (e POST /upload sem arquivo)
pub fn render_upload_form(notice: Option<&str>) -> Html<String> {
    let notice_html = notice
        .map(|n| format!(r#"<div class="notice">{}</div>"#, escape_html(n)))
        .unwrap_or_default();

    let body = format!(
        r#"                <h1>📤 Enviar arquivo para o Box</h1>
                {}
                <form action="/upload" method="post" enctype="multipart/form-data">
                    <p><input type="file" name="file"></p>
                    <p><button type="submit">Enviar</button></p>
                </form>"#,
        notice_html
    );

    layout("Box Upload", &body)
}

/// Página de resultado com o link compartilhado
pub fn render_result_page(outcome: &UploadOutcome) -> Html<String> {
    let link = escape_html(&outcome.shared_link);
    let folder = escape_html(&outcome.folder_name);

    let password_html = if outcome.password_protected {
        format!(
            r#"<p>🔒 O link é protegido por senha. Senha: <code>{}</code></p>"#,
            folder
        )
    } else {
        String::new()
    };

    let body = format!(
        r#"                <div class="success">
                    <h1>✅ Upload concluído</h1>
                    <p>Arquivo <strong>{file}</strong> enviado para a pasta <code>{folder}</code>.</p>
                </div>
                <div class="link-box">
                    <p>Link compartilhado:</p>
                    <p><a href="{link}">{link}</a></p>
                    {password}
                </div>
                <p><a href="/upload">Enviar outro arquivo</a></p>"#,
        file = escape_html(&outcome.file_name),
        folder = folder,
        link = link,
        password = password_html
    );

    layout("Box Upload - Sucesso", &body)
}

/// Página de erro usada por `AppError::into_response`
pub fn render_error_page(status: StatusCode, message: &str) -> Html<String> {
    let body = format!(
        r#"                <div class="error">
                    <h1>❌ Erro {code}</h1>
                    <p>{message}</p>
                </div>
                <p><a href="/">Voltar ao início</a></p>"#,
        code = status.as_u16(),
        message = escape_html(message)
    );

    layout("Box Upload - Erro", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(protected: bool) -> UploadOutcome {
        UploadOutcome {
            shared_link: "https://app.box.com/s/abc123".to_string(),
            folder_name: "Xk7pQ2mZ".to_string(),
            folder_id: "111".to_string(),
            file_id: "222".to_string(),
            file_name: "report.pdf".to_string(),
            password_protected: protected,
        }
    }

    #[test]
    fn test_upload_form_has_file_field() {
        let Html(page) = render_upload_form(None);
        assert!(page.contains(r#"enctype="multipart/form-data""#));
        assert!(page.contains(r#"name="file""#));
        assert!(!page.contains("class=\"notice\""));
    }

    #[test]
    fn test_upload_form_notice_is_escaped() {
        let Html(page) = render_upload_form(Some("<b>no file</b>"));
        assert!(page.contains("&lt;b&gt;no file&lt;/b&gt;"));
    }

    #[test]
    fn test_result_page_shows_link_and_folder() {
        let Html(page) = render_result_page(&outcome(false));
        assert!(page.contains("https://app.box.com/s/abc123"));
        assert!(page.contains("Xk7pQ2mZ"));
        assert!(page.contains("report.pdf"));
        assert!(!page.contains("🔒"));
    }

    #[test]
    fn test_result_page_password_notice() {
        let Html(page) = render_result_page(&outcome(true));
        assert!(page.contains("🔒"));
    }

    #[test]
    fn test_error_page() {
        let Html(page) = render_error_page(StatusCode::BAD_GATEWAY, "Box API error: <quota>");
        assert!(page.contains("502"));
        assert!(page.contains("&lt;quota&gt;"));
    }
}
