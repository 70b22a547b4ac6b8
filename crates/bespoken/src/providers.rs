pub mod base;
pub mod claude;

#[cfg(test)]
pub mod mock;
