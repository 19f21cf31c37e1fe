mod https_redirection;
