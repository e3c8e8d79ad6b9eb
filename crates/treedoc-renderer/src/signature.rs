//! Heuristics over declared display names such as `Sum(int x, int y = 0)`.

/// Parameter tokens of a display name: the text after the first `(`,
/// split on `,` and `)`. Empty when the name has no parameter list.
fn declared_params(display_name: &str) -> Vec<&str> {
    display_name
        .split_once('(')
        .map(|(_, list)| list.split([',', ')']).collect())
        .unwrap_or_default()
}

/// Infer the declared type of a documented parameter.
///
/// Matches `param` as a suffix of a declared parameter token (default value
/// stripped) and requires whitespace right before the match, so `X` does not
/// match `maxX`. Returns an empty string when nothing matches. Parameter
/// lists with nested generic commas are not split correctly.
#[must_use]
pub fn param_type(display_name: &str, param: &str) -> String {
    if param.is_empty() {
        return String::new();
    }
    for declared in declared_params(display_name) {
        if !declared.contains(param) {
            continue;
        }
        let cut = declared
            .split_once('=')
            .map_or(declared, |(decl, _)| decl)
            .trim_end();
        if let Some(before) = cut.strip_suffix(param)
            && before.ends_with(char::is_whitespace)
        {
            return before.trim().to_owned();
        }
    }
    String::new()
}

/// Drop parameter names and default values from a display name.
///
/// `Sum(int x, int y = 3)` becomes `Sum(int, int)`. Names without a
/// parameter list are returned unchanged.
#[must_use]
pub fn strip_param_names(display_name: &str) -> String {
    let Some((head, list)) = display_name.split_once('(') else {
        return display_name.to_owned();
    };
    let (list, tail) = list.rsplit_once(')').unwrap_or((list, ""));
    let types: Vec<&str> = list
        .split(',')
        .map(|param| {
            let param = param.split_once('=').map_or(param, |(decl, _)| decl).trim();
            param
                .rsplit_once(char::is_whitespace)
                .map_or(param, |(ty, _)| ty.trim_end())
        })
        .filter(|ty| !ty.is_empty())
        .collect();
    format!("{head}({}){tail}", types.join(", "))
}
