//! Built-in nginx virtual-host template.
//!
//! Used by the pipeline when no previously generated config exists. The
//! `server_name` value and the `{wp_main_host}` placeholders are rewritten
//! by `sitekit_core::domain::NginxConfigPatcher`.

/// Pristine virtual-host template for a freshly provisioned site.
pub const DEFAULT_NGINX_TEMPLATE: &str = "\
server {
    listen 80;
    listen 443 ssl;
    server_name {wp_main_host};
    root /srv/www/{wp_main_host}/htdocs;

    error_log /srv/www/{wp_main_host}/log/error.log;
    access_log /srv/www/{wp_main_host}/log/access.log;

    index index.php index.html;

    location / {
        try_files $uri $uri/ /index.php?$args;
    }

    location ~ \\.php$ {
        fastcgi_split_path_info ^(.+\\.php)(/.+)$;
        fastcgi_pass unix:/var/run/php-fpm.sock;
        fastcgi_index index.php;
        include fastcgi_params;
    }
}
";
