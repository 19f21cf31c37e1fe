mod api;
mod middleware;
mod pages;
