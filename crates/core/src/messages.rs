//! User-facing message texts.

pub const SESSION_EXPIRED: &str = "登录已过期，请重新登录";

pub const LOGIN_SUCCEEDED: &str = "登录成功";
pub const LOGIN_FAILED: &str = "登录失败";
pub const LOGIN_FAILED_CHECK_CREDENTIALS: &str = "登录失败，请检查用户名和密码";
pub const ADMIN_ONLY: &str = "只有管理员可以登录";
pub const USERNAME_REQUIRED: &str = "请输入用户名";
pub const PASSWORD_REQUIRED: &str = "请输入密码";

pub const LOAD_FAILED: &str = "加载失败";

pub const DELETE_SUCCEEDED: &str = "删除成功";
pub const DELETE_FAILED: &str = "删除失败";
pub const NOTHING_SELECTED: &str = "请选择要删除的漫画";
pub const BATCH_DELETE_FAILED: &str = "批量删除失败";

pub const IMPORT_FAILED: &str = "导入失败";

/// `成功删除 N 个漫画`, with `，失败 M 个` appended when anything failed.
pub fn batch_delete_summary(succeeded: usize, failed: usize) -> String {
    if failed > 0 {
        format!("成功删除 {} 个漫画，失败 {} 个", succeeded, failed)
    } else {
        format!("成功删除 {} 个漫画", succeeded)
    }
}

pub fn import_summary(count: usize) -> String {
    format!("成功导入 {} 个漫画", count)
}

/// `<prefix>: <detail>`
pub fn with_detail(prefix: &str, detail: &str) -> String {
    format!("{}: {}", prefix, detail)
}
