mod chunk;
mod cost_model;
mod link_sharing;
