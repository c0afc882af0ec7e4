/// Generates actix handlers around `<name>_impl` functions.
///
/// Each `_impl` returns `ApiResult<HttpResponse>`; errors are rendered here,
/// with internal detail echoed only outside production.
#[macro_export]
macro_rules! handler_funcs {
    ( $( $func_name:ident ( $( $arg:ident : $arg_ty:ty ),* $(,)? ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                async fn $func_name(
                    settings: actix_web::web::Data<$crate::settings::Settings>,
                    $( $arg: $arg_ty ),*
                ) -> actix_web::HttpResponse {
                    match [<$func_name _impl>]($( $arg ),*).await {
                        Ok(response) => response,
                        Err(err) => err.into_response(settings.expose_errors()),
                    }
                }
            }
        )+
    };
}

/// `ILIKE` pattern matching `s` anywhere in the column.
pub fn get_str_pattern<S: AsRef<str>>(s: S) -> String {
    format!("%{}%", s.as_ref())
}

/// Query-string filters that are empty or blank impose no restriction.
pub fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
