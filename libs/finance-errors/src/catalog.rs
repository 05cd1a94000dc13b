//! Static error definitions, one per problem type.

use http::StatusCode;

use crate::problem::Problem;

/// Fixed status, title and type of one problem kind. The detail varies per
/// occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrDef {
    pub status: StatusCode,
    pub title: &'static str,
    pub type_url: &'static str,
}

impl ErrDef {
    pub fn problem(&self, detail: impl Into<String>) -> Problem {
        Problem::new(self.status, self.title, detail).with_type(self.type_url)
    }
}

pub const BAD_REQUEST: ErrDef = ErrDef {
    status: StatusCode::BAD_REQUEST,
    title: "Некорректные параметры запроса",
    type_url: "https://tools.ietf.org/html/rfc7231#section-6.5.1",
};

pub const NOT_FOUND: ErrDef = ErrDef {
    status: StatusCode::NOT_FOUND,
    title: "Ресурс не найден",
    type_url: "https://tools.ietf.org/html/rfc7231#section-6.5.4",
};

pub const CONFLICT: ErrDef = ErrDef {
    status: StatusCode::CONFLICT,
    title: "Конфликт состояния ресурса",
    type_url: "https://tools.ietf.org/html/rfc7231#section-6.5.8",
};

pub const INTERNAL_SERVER_ERROR: ErrDef = ErrDef {
    status: StatusCode::INTERNAL_SERVER_ERROR,
    title: "Внутренняя ошибка сервера",
    type_url: "https://tools.ietf.org/html/rfc7231#section-6.6.1",
};

/// Detail sent for every unclassified error in place of its message.
pub const INTERNAL_SERVER_ERROR_DETAIL: &str = "Произошла непредвиденная ошибка сервера";
