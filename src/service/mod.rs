pub mod access;
pub mod approval;
pub mod block_list;
pub mod panel;
pub mod permission;
pub mod reconciler;
pub mod selection;
pub mod session;
pub mod status;

#[cfg(test)]
mod test;
