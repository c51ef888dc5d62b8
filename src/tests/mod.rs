mod authorization;
mod check_token;
mod link_issue;
mod link_status;
mod template;
