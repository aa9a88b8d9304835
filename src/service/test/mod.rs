mod approval;
mod permission;
mod status;
