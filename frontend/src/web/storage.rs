//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 替代 `gloo-storage`，提供简洁的本地存储接口。
//! 非 wasm 目标（本地测试）退化为线程内的内存表，接口行为一致。

/// 本地存储操作封装
///
/// 提供静态方法访问浏览器 LocalStorage API。
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取存储的字符串值；键不存在或发生错误时返回 None
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置存储值，返回操作是否成功
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除存储的键值对，返回操作是否成功
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }

    /// 清空全部键值对
    pub fn clear() -> bool {
        Self::storage().and_then(|s| s.clear().ok()).is_some()
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::cell::RefCell;
    use std::collections::HashMap;

    thread_local! {
        pub(super) static STORE: RefCell<HashMap<String, String>> =
            RefCell::new(HashMap::new());
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl LocalStorage {
    pub fn get(key: &str) -> Option<String> {
        native::STORE.with(|store| store.borrow().get(key).cloned())
    }

    pub fn set(key: &str, value: &str) -> bool {
        native::STORE.with(|store| {
            store
                .borrow_mut()
                .insert(key.to_string(), value.to_string())
        });
        true
    }

    pub fn delete(key: &str) -> bool {
        native::STORE.with(|store| store.borrow_mut().remove(key).is_some())
    }

    pub fn clear() -> bool {
        native::STORE.with(|store| store.borrow_mut().clear());
        true
    }
}
