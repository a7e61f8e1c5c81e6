//! Documentation pack compiled into the binary.
//!
//! Pages are kept as files under `resources/documentation/` and embedded
//! verbatim, so the on-disk layout and the embedded layout are the same.

use phf::phf_map;

/// Prefix of the pages for shell builtins.
pub const INTERNAL_PREFIX: &str = "documentation/internal";

/// Prefix of the pages for external commands.
pub const EXTERNAL_PREFIX: &str = "documentation/external";

/// Logical path to page content.
pub static BUILTIN_PACK: phf::Map<&'static str, &'static str> = phf_map! {
    "documentation/internal/alias.html" => include_str!("../../resources/documentation/internal/alias.html"),
    "documentation/internal/cd.html" => include_str!("../../resources/documentation/internal/cd.html"),
    "documentation/internal/declare.html" => include_str!("../../resources/documentation/internal/declare.html"),
    "documentation/internal/echo.html" => include_str!("../../resources/documentation/internal/echo.html"),
    "documentation/internal/eval.html" => include_str!("../../resources/documentation/internal/eval.html"),
    "documentation/internal/exit.html" => include_str!("../../resources/documentation/internal/exit.html"),
    "documentation/internal/export.html" => include_str!("../../resources/documentation/internal/export.html"),
    "documentation/internal/local.html" => include_str!("../../resources/documentation/internal/local.html"),
    "documentation/internal/printf.html" => include_str!("../../resources/documentation/internal/printf.html"),
    "documentation/internal/read.html" => include_str!("../../resources/documentation/internal/read.html"),
    "documentation/internal/readonly.html" => include_str!("../../resources/documentation/internal/readonly.html"),
    "documentation/internal/return.html" => include_str!("../../resources/documentation/internal/return.html"),
    "documentation/internal/set.html" => include_str!("../../resources/documentation/internal/set.html"),
    "documentation/internal/shift.html" => include_str!("../../resources/documentation/internal/shift.html"),
    "documentation/internal/source.html" => include_str!("../../resources/documentation/internal/source.html"),
    "documentation/internal/test.html" => include_str!("../../resources/documentation/internal/test.html"),
    "documentation/internal/trap.html" => include_str!("../../resources/documentation/internal/trap.html"),
    "documentation/internal/unset.html" => include_str!("../../resources/documentation/internal/unset.html"),
    "documentation/external/cat.html" => include_str!("../../resources/documentation/external/cat.html"),
    "documentation/external/chmod.html" => include_str!("../../resources/documentation/external/chmod.html"),
    "documentation/external/cp.html" => include_str!("../../resources/documentation/external/cp.html"),
    "documentation/external/find.html" => include_str!("../../resources/documentation/external/find.html"),
    "documentation/external/grep.html" => include_str!("../../resources/documentation/external/grep.html"),
    "documentation/external/ls.html" => include_str!("../../resources/documentation/external/ls.html"),
    "documentation/external/mkdir.html" => include_str!("../../resources/documentation/external/mkdir.html"),
    "documentation/external/mv.html" => include_str!("../../resources/documentation/external/mv.html"),
    "documentation/external/rm.html" => include_str!("../../resources/documentation/external/rm.html"),
    "documentation/external/sed.html" => include_str!("../../resources/documentation/external/sed.html"),
};
