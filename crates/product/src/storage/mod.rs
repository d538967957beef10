mod local;

pub use self::local::LocalImageStore;
