/// Utilitários para manipulação segura de strings

/// Nome usado quando o nome enviado pelo navegador não serve como arquivo
pub const FALLBACK_FILENAME: &str = "upload.bin";

/// Trunca uma string sem cortar um caractere UTF-8 no meio
///
/// Usado para registrar tokens e códigos de autorização apenas parcialmente nos logs.
pub fn truncate_safe(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    &s[..end]
}

/// Escapa texto para inserção em HTML
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reduz o nome enviado pelo navegador ao último componente do caminho
///
/// Navegadores antigos mandam o caminho completo (`C:\Users\...\report.pdf`),
/// então tanto `/` quanto `\` contam como separador. O nome resultante
/// nunca sai do diretório de staging.
pub fn sanitize_filename(filename: &str) -> String {
    let name = filename
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or("")
        .trim()
        .trim_matches('\0');

    if name.is_empty() || name == "." || name == ".." {
        return FALLBACK_FILENAME.to_string();
    }

    name.to_string()
}
