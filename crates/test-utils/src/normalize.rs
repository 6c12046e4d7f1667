use std::borrow::Cow;

use camino::Utf8Path;

pub fn normalize_newlines(input: &str) -> Cow<'_, str> {
    if !input.contains('\r') {
        return Cow::Borrowed(input);
    }

    let mut normalized = input.replace("\r\n", "\n");
    normalized = normalized.replace('\r', "\n");
    Cow::Owned(normalized)
}

pub fn normalize_path_separators(input: &str) -> String {
    input.replace('\\', "/")
}

/// Replace every spelling of `root` in `text` (native and forward-slash) with
/// `token`, so output mentioning temporary directories can be compared.
pub fn replace_root(text: &str, root: &Utf8Path, token: &str) -> String {
    let native = root.as_str();
    let forward = normalize_path_separators(native);
    let output = normalize_path_separators(&text.replace(native, token));
    output.replace(&forward, token)
}
